//! Owner commands

use clap::{Args, Subcommand};
use serde_json::json;

use crate::domain::owner::OwnerId;

use super::{bootstrap, print_json};

#[derive(Subcommand)]
pub enum OwnerCommand {
    /// Register a new owner
    Create(CreateOwnerArgs),

    /// Delete an owner with all keys, sets, plans and audit entries
    Delete(DeleteOwnerArgs),
}

#[derive(Args)]
pub struct CreateOwnerArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Owner id; generated when omitted
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Args)]
pub struct DeleteOwnerArgs {
    /// Owner id
    pub id: String,
}

pub async fn run(command: OwnerCommand) -> anyhow::Result<()> {
    let state = bootstrap().await?;

    match command {
        OwnerCommand::Create(args) => {
            let owner = state
                .owner_service
                .create(args.id.as_deref(), &args.name)
                .await?;
            print_json(&owner)
        }
        OwnerCommand::Delete(args) => {
            let id = OwnerId::new(&args.id)?;
            state.owner_service.delete(&id).await?;
            print_json(&json!({ "deleted": id }))
        }
    }
}
