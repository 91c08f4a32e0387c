//! Staleness filter.
//!
//! Drops pull requests and anything updated inside the staleness window.
//! Survivors keep the tracker's original order so rendering is deterministic.

use tracing::debug;

use crate::{Issue, StalenessWindow, Timestamp};

/// Returns the stale subset of `issues` as of `now`.
pub fn filter_stale(issues: Vec<Issue>, now: Timestamp, window: StalenessWindow) -> Vec<Issue> {
    issues
        .into_iter()
        .filter(|issue| {
            if issue.is_pull_request {
                debug!(issue = %issue.number, "Skipping pull request returned by issue search");
                return false;
            }
            if !window.is_stale(issue.updated_at, now) {
                debug!(
                    issue = %issue.number,
                    updated_at = %issue.updated_at,
                    "Skipping recently updated issue"
                );
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::IssueNumber;

    fn now() -> Timestamp {
        Timestamp::from_utc(Utc.with_ymd_and_hms(2024, 6, 20, 9, 30, 0).unwrap())
    }

    fn issue(number: u64, age: Duration, is_pull_request: bool) -> Issue {
        Issue {
            number: IssueNumber::new(number),
            title: format!("Issue {number}"),
            updated_at: Timestamp::from_utc(now().as_datetime() - age),
            assignees: Vec::new(),
            is_pull_request,
        }
    }

    fn numbers(issues: &[Issue]) -> Vec<u64> {
        issues.iter().map(|i| i.number.as_u64()).collect()
    }

    #[test]
    fn keeps_only_issues_older_than_the_window() {
        let issues = vec![
            issue(1, Duration::days(10), false),
            issue(2, Duration::days(2), false),
            issue(3, Duration::days(7), false),
            issue(4, Duration::days(7) - Duration::seconds(1), false),
        ];

        let stale = filter_stale(issues, now(), StalenessWindow::default());

        assert_eq!(numbers(&stale), vec![1, 3]);
    }

    #[test]
    fn drops_pull_requests_regardless_of_age() {
        let issues = vec![
            issue(5, Duration::days(30), true),
            issue(6, Duration::days(30), false),
        ];

        let stale = filter_stale(issues, now(), StalenessWindow::default());

        assert_eq!(numbers(&stale), vec![6]);
    }

    #[test]
    fn preserves_tracker_order() {
        let issues = vec![
            issue(9, Duration::days(8), false),
            issue(3, Duration::days(40), false),
            issue(7, Duration::days(12), false),
        ];

        let stale = filter_stale(issues, now(), StalenessWindow::default());

        assert_eq!(numbers(&stale), vec![9, 3, 7]);
    }

    #[test]
    fn everything_recent_yields_nothing() {
        let issues = vec![
            issue(1, Duration::hours(1), false),
            issue(2, Duration::days(6), false),
        ];

        assert!(filter_stale(issues, now(), StalenessWindow::default()).is_empty());
    }
}
