//! API key commands

use clap::{Args, Subcommand};
use serde_json::json;

use crate::domain::api_key::ApiKeyId;
use crate::domain::owner::OwnerId;

use super::{bootstrap, print_json};

#[derive(Subcommand)]
pub enum KeyCommand {
    /// Issue a key; the secret is printed once and never again
    Create(CreateKeyArgs),

    /// List an owner's keys
    List(OwnerArgs),

    /// Revoke a key; the row stays for the audit trail
    Revoke(KeyRefArgs),

    /// Delete a key
    Delete(KeyRefArgs),
}

#[derive(Args)]
pub struct CreateKeyArgs {
    /// Owner id
    #[arg(long)]
    pub owner: String,

    /// Label for the key
    #[arg(long)]
    pub name: String,
}

#[derive(Args)]
pub struct OwnerArgs {
    /// Owner id
    #[arg(long)]
    pub owner: String,
}

#[derive(Args)]
pub struct KeyRefArgs {
    /// Owner id
    #[arg(long)]
    pub owner: String,

    /// Key id
    pub key_id: String,
}

pub async fn run(command: KeyCommand) -> anyhow::Result<()> {
    let state = bootstrap().await?;

    match command {
        KeyCommand::Create(args) => {
            let owner = OwnerId::new(&args.owner)?;
            let created = state.key_store.create_key(&owner, &args.name).await?;
            print_json(&json!({
                "key": created.api_key,
                "secret": created.secret,
            }))
        }
        KeyCommand::List(args) => {
            let owner = OwnerId::new(&args.owner)?;
            let keys = state.key_store.list_keys(&owner).await?;
            print_json(&keys)
        }
        KeyCommand::Revoke(args) => {
            let owner = OwnerId::new(&args.owner)?;
            let key = ApiKeyId::new(&args.key_id)?;
            let revoked = state.key_store.revoke(&owner, &key).await?;
            print_json(&revoked)
        }
        KeyCommand::Delete(args) => {
            let owner = OwnerId::new(&args.owner)?;
            let key = ApiKeyId::new(&args.key_id)?;
            state.key_store.delete(&owner, &key).await?;
            print_json(&json!({ "deleted": key }))
        }
    }
}
