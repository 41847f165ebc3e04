//! Command service - the owner-scoped fitness commands
//!
//! Every handler receives an already-authenticated owner and raw JSON
//! arguments, and always produces a [`CommandOutcome`]. Domain errors are
//! folded into failure outcomes here and never escape.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::domain::command::{
    AssignWorkoutArgs, CommandName, CommandOutcome, ExerciseArgs, LastSetsArgs, LimitArgs,
    LogSetArgs,
};
use crate::domain::owner::Owner;
use crate::domain::workout::limits::{LAST_SETS_LIMIT, PLAN_LIST_LIMIT, RECENT_SETS_LIMIT};
use crate::domain::workout::{
    ExerciseName, FuzzyMatch, PlanRecord, PlanRepository, SetRecord, SetRecordRepository,
};
use crate::domain::DomainError;

type HandlerResult = Result<CommandOutcome, DomainError>;

/// Runs commands against the set and plan repositories
pub struct CommandService {
    sets: Arc<dyn SetRecordRepository>,
    plans: Arc<dyn PlanRepository>,
}

impl std::fmt::Debug for CommandService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandService").finish_non_exhaustive()
    }
}

impl CommandService {
    pub fn new(sets: Arc<dyn SetRecordRepository>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { sets, plans }
    }

    /// Execute one command for `owner`
    #[instrument(skip(self, owner, args), fields(owner_id = %owner.id(), command = %command))]
    pub async fn execute(&self, owner: &Owner, command: CommandName, args: &Value) -> CommandOutcome {
        let result = match command {
            CommandName::LogSet => self.log_set(owner, args).await,
            CommandName::GetLastSet => self.get_last_set(owner, args).await,
            CommandName::GetLastSets => self.get_last_sets(owner, args).await,
            CommandName::GetRecentSets => self.get_recent_sets(owner, args).await,
            CommandName::DeleteLastSet => self.delete_last_set(owner, args).await,
            CommandName::AssignWorkout => self.assign_workout(owner, args).await,
            CommandName::ListWorkouts => self.list_workouts(owner, args).await,
        };

        result.unwrap_or_else(|e| {
            if e.is_internal() {
                error!(error = %e, "Command failed in storage");
            } else {
                debug!(kind = e.kind(), error = %e, "Command rejected");
            }
            CommandOutcome::from(e)
        })
    }

    async fn log_set(&self, owner: &Owner, args: &Value) -> HandlerResult {
        let args = LogSetArgs::from_value(args)?;
        let record = SetRecord::new(
            owner.id().clone(),
            args.exercise,
            args.weight,
            args.reps,
            args.occurred_at.unwrap_or_else(Utc::now),
        )?;

        let created = self.sets.create(record).await?;
        info!(set_id = %created.id(), exercise = %created.exercise(), "Set logged");

        let message = format!(
            "Logged {} x {} of {}",
            created.weight(),
            created.reps(),
            created.exercise()
        );
        Ok(CommandOutcome::success(to_data(&created)?).with_message(message))
    }

    async fn get_last_set(&self, owner: &Owner, args: &Value) -> HandlerResult {
        let args = ExerciseArgs::from_value(args)?;
        let latest = self
            .sets
            .latest_for_exercise(owner.id(), &args.exercise, 1)
            .await?;

        match latest.into_iter().next() {
            Some(record) => Ok(CommandOutcome::success(to_data(&record)?)),
            None => self.exercise_miss(owner, &args.exercise).await,
        }
    }

    async fn get_last_sets(&self, owner: &Owner, args: &Value) -> HandlerResult {
        let args = LastSetsArgs::from_value(args, LAST_SETS_LIMIT)?;
        let records = self
            .sets
            .latest_for_exercise(owner.id(), &args.exercise, args.limit)
            .await?;

        if records.is_empty() {
            return self.exercise_miss(owner, &args.exercise).await;
        }

        Ok(CommandOutcome::success(to_data(&records)?))
    }

    async fn get_recent_sets(&self, owner: &Owner, args: &Value) -> HandlerResult {
        let args = LimitArgs::from_value(args, RECENT_SETS_LIMIT)?;
        let records = self.sets.latest(owner.id(), args.limit).await?;

        if records.is_empty() {
            return Ok(CommandOutcome::failure("not_found", "No sets found"));
        }

        Ok(CommandOutcome::success(to_data(&records)?))
    }

    async fn delete_last_set(&self, owner: &Owner, args: &Value) -> HandlerResult {
        let args = ExerciseArgs::from_value(args)?;
        let latest = self
            .sets
            .latest_for_exercise(owner.id(), &args.exercise, 1)
            .await?;

        let Some(snapshot) = latest.into_iter().next() else {
            return self.exercise_miss(owner, &args.exercise).await;
        };

        if !self.sets.delete(owner.id(), snapshot.id()).await? {
            // Removed concurrently between the read and the delete
            return self.exercise_miss(owner, &args.exercise).await;
        }

        info!(set_id = %snapshot.id(), exercise = %snapshot.exercise(), "Set deleted");

        let message = format!("Deleted last set of {}", snapshot.exercise());
        Ok(CommandOutcome::success(to_data(&snapshot)?).with_message(message))
    }

    async fn assign_workout(&self, owner: &Owner, args: &Value) -> HandlerResult {
        let args = AssignWorkoutArgs::from_value(args)?;
        let plan = PlanRecord::new(
            owner.id().clone(),
            &args.name,
            args.exercises,
            args.scheduled_for,
        )?;

        let created = self.plans.create(plan).await?;
        info!(plan_id = %created.id(), exercises = created.exercises().len(), "Workout assigned");

        let message = format!("Assigned workout '{}'", created.name());
        Ok(CommandOutcome::success(to_data(&created)?).with_message(message))
    }

    async fn list_workouts(&self, owner: &Owner, args: &Value) -> HandlerResult {
        let args = LimitArgs::from_value(args, PLAN_LIST_LIMIT)?;
        let plans = self.plans.list_by_owner(owner.id(), args.limit).await?;

        if plans.is_empty() {
            return Ok(CommandOutcome::failure("not_found", "No workouts found"));
        }

        Ok(CommandOutcome::success(to_data(&plans)?))
    }

    /// Failure for an exact-name miss, with suggestions or the full list
    async fn exercise_miss(&self, owner: &Owner, exercise: &ExerciseName) -> HandlerResult {
        let known = self.sets.distinct_exercises(owner.id()).await?;
        let fuzzy = FuzzyMatch::search(exercise, &known);

        debug!(exercise = %exercise, ?fuzzy, "Exercise lookup missed");

        Ok(CommandOutcome::exercise_not_found(
            format!("No sets found for '{}'", exercise),
            fuzzy,
        ))
    }
}

fn to_data<T: Serialize + ?Sized>(value: &T) -> Result<Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::internal(format!("Failed to serialize result: {}", e)))
}
