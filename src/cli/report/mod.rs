//! Read-only reports: popularity, owner statistics and the audit trail

use clap::Args;

use super::{bootstrap, print_json};

#[derive(Args)]
pub struct KeyArgs {
    /// API key secret
    #[arg(long)]
    pub key: String,
}

#[derive(Args)]
pub struct StatsArgs {
    /// API key secret
    #[arg(long)]
    pub key: String,

    /// Window in days; the configured default when omitted
    #[arg(long)]
    pub days: Option<u32>,
}

#[derive(Args)]
pub struct AuditArgs {
    /// API key secret
    #[arg(long)]
    pub key: String,

    /// Maximum entries, clamped to 1..=100
    #[arg(long)]
    pub limit: Option<i64>,
}

pub async fn popularity(args: KeyArgs) -> anyhow::Result<()> {
    let state = bootstrap().await?;
    let popularity = state.stats_service.exercise_popularity(&args.key).await?;
    print_json(&popularity)
}

pub async fn stats(args: StatsArgs) -> anyhow::Result<()> {
    let state = bootstrap().await?;
    let stats = state
        .stats_service
        .owner_statistics(&args.key, args.days)
        .await?;
    print_json(&stats)
}

pub async fn audit(args: AuditArgs) -> anyhow::Result<()> {
    let state = bootstrap().await?;
    let entries = state
        .dispatch_service
        .list_audit_entries(&args.key, args.limit)
        .await?;
    print_json(&entries)
}
