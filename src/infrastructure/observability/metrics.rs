//! Command metrics through the `metrics` facade
//!
//! No recorder is installed here; whatever the embedding binary installs
//! receives these series.

use std::time::Duration;

use metrics::{counter, gauge, histogram};

/// Publish the crate version as a constant gauge
pub fn record_build_info() {
    gauge!("fitgate_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Parameters for a dispatched command
pub struct CommandMetricParams<'a> {
    pub command: &'a str,
    /// `"success"` or the failure's error kind
    pub outcome: &'a str,
    pub duration: Duration,
}

/// Record one dispatched command
pub fn record_command(params: CommandMetricParams<'_>) {
    counter!(
        "fitgate_commands_total",
        "command" => params.command.to_string(),
        "outcome" => params.outcome.to_string()
    )
    .increment(1);

    histogram!(
        "fitgate_command_duration_seconds",
        "command" => params.command.to_string()
    )
    .record(params.duration.as_secs_f64());
}

/// Record a rejected key
pub fn record_auth_failure() {
    counter!("fitgate_auth_failures_total").increment(1);
}

/// Record an audit write that failed or timed out
pub fn record_audit_failure() {
    counter!("fitgate_audit_failures_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_build_info();
        record_auth_failure();
        record_audit_failure();
        record_command(CommandMetricParams {
            command: "log_set",
            outcome: "success",
            duration: Duration::from_millis(4),
        });
    }
}
