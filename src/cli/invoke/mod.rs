//! Invoke command - the CLI transport adapter for the dispatcher

use clap::Args;
use serde_json::Value;

use crate::domain::audit::CallerContext;

use super::{bootstrap, print_json};

/// User agent recorded for invocations made through the CLI
const CLI_USER_AGENT: &str = concat!("fitgate-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Args)]
pub struct InvokeArgs {
    /// API key secret
    #[arg(long)]
    pub key: String,

    /// Command name, e.g. log_set or get_last_sets
    pub command: String,

    /// Arguments as a JSON object
    #[arg(long, default_value = "{}")]
    pub args: String,
}

pub async fn run(args: InvokeArgs) -> anyhow::Result<()> {
    let arguments = parse_arguments(&args.args)?;
    let state = bootstrap().await?;

    let caller = CallerContext::from_ip("local").with_user_agent(CLI_USER_AGENT);
    let outcome = state
        .dispatch_service
        .invoke(&args.key, &args.command, arguments, caller)
        .await?;

    print_json(&outcome)
}

fn parse_arguments(raw: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| anyhow::anyhow!("--args must be valid JSON: {}", e))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let value = parse_arguments(r#"{"exercise": "squat"}"#).unwrap();
        assert_eq!(value["exercise"], "squat");

        assert!(parse_arguments("{not json").is_err());
    }
}
