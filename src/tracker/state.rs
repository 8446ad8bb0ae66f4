//! User-facing tracker state.

use crate::lookup::LookupResult;

/// What the user sees: the draft query, the last result, and the error flag.
///
/// Results and the error flag are replaced on every attempt, never merged. A
/// failed lookup leaves the previous result in place, so stale data can be
/// visible while the error flag is raised.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    /// Current contents of the input box; cleared after a successful lookup
    pub query: String,
    /// Most recent successful lookup
    pub result: Option<LookupResult>,
    /// Raised by an empty submission or a failed lookup
    pub error: bool,
}

impl TrackerState {
    pub(crate) fn apply_success(&mut self, result: LookupResult) {
        self.result = Some(result);
        self.error = false;
        self.query.clear();
    }

    pub(crate) fn apply_failure(&mut self) {
        self.error = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::Location;

    fn sample(ip: &str) -> LookupResult {
        LookupResult {
            ip: ip.to_string(),
            isp: "X".into(),
            location: Location {
                region: "CA".into(),
                city: "Mountain View".into(),
                postal_code: None,
                timezone: "-08:00".into(),
                lat: 37.4,
                lng: -122.1,
            },
        }
    }

    #[test]
    fn test_success_replaces_result_and_clears_query() {
        let mut state = TrackerState {
            query: "8.8.8.8".into(),
            result: Some(sample("1.1.1.1")),
            error: true,
        };
        state.apply_success(sample("8.8.8.8"));
        assert_eq!(state.result, Some(sample("8.8.8.8")));
        assert!(!state.error);
        assert!(state.query.is_empty());
    }

    #[test]
    fn test_failure_keeps_stale_result() {
        let mut state = TrackerState {
            query: "bad".into(),
            result: Some(sample("1.1.1.1")),
            error: false,
        };
        state.apply_failure();
        assert!(state.error);
        assert_eq!(state.result, Some(sample("1.1.1.1")));
        assert_eq!(state.query, "bad");
    }
}
