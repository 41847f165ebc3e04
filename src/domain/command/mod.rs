//! Command vocabulary shared by the dispatcher and the handlers

mod args;
mod name;
mod outcome;

pub use args::{
    coerce_count, coerce_f64, AssignWorkoutArgs, ExerciseArgs, LastSetsArgs, LimitArgs,
    LogSetArgs,
};
pub use name::CommandName;
pub use outcome::CommandOutcome;
