//! Observability infrastructure - Metrics

mod metrics;

pub use metrics::{
    record_audit_failure, record_auth_failure, record_build_info, record_command,
    CommandMetricParams,
};
