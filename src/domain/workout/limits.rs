//! Clamping of "how many records" arguments

/// An inclusive range with a default used for absent or non-positive input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitRange {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

impl LimitRange {
    pub const fn new(min: usize, max: usize, default: usize) -> Self {
        Self { min, max, default }
    }

    /// Clamp a requested limit. Never fails.
    pub fn clamp(&self, requested: Option<i64>) -> usize {
        match requested {
            None => self.default,
            Some(n) if n <= 0 => self.default,
            Some(n) => usize::try_from(n)
                .unwrap_or(self.max)
                .clamp(self.min, self.max),
        }
    }
}

/// `get_last_sets`
pub const LAST_SETS_LIMIT: LimitRange = LimitRange::new(1, 20, 5);

/// `get_recent_sets`
pub const RECENT_SETS_LIMIT: LimitRange = LimitRange::new(1, 50, 10);

/// `list_workouts`
pub const PLAN_LIST_LIMIT: LimitRange = LimitRange::new(1, 20, 5);

/// Audit trail listing
pub const AUDIT_LIST_LIMIT: LimitRange = LimitRange::new(1, 100, 20);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_when_absent_or_non_positive() {
        assert_eq!(RECENT_SETS_LIMIT.clamp(None), 10);
        assert_eq!(RECENT_SETS_LIMIT.clamp(Some(0)), 10);
        assert_eq!(RECENT_SETS_LIMIT.clamp(Some(-3)), 10);
    }

    #[test]
    fn test_upper_bound() {
        assert_eq!(RECENT_SETS_LIMIT.clamp(Some(1000)), 50);
        assert_eq!(LAST_SETS_LIMIT.clamp(Some(21)), 20);
        assert_eq!(LAST_SETS_LIMIT.clamp(Some(i64::MAX)), 20);
    }

    #[test]
    fn test_in_range_passes_through() {
        assert_eq!(LAST_SETS_LIMIT.clamp(Some(1)), 1);
        assert_eq!(LAST_SETS_LIMIT.clamp(Some(7)), 7);
        assert_eq!(AUDIT_LIST_LIMIT.clamp(Some(100)), 100);
    }
}
