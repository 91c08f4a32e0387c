//! Report construction and message rendering.
//!
//! A [`Report`] is never empty: [`Report::from_rows`] returns `None` when there
//! is nothing to report, which short-circuits delivery. Rendering is a pure
//! function of the rows and the repository, so a fixed tracker snapshot and a
//! fixed "now" always produce byte-identical text.

use serde::Serialize;

use crate::{FallbackMention, IssueNumber, RepositoryId, ResolvedIssue};

/// Longest title rendered without truncation, in characters.
pub const MAX_TITLE_CHARS: usize = 40;

const ELLIPSIS: &str = "...";

const TABLE_HEADER: &str = "| Issue | Title | Assignees |";
const TABLE_SEPARATOR: &str = "| --- | --- | --- |";
const CODE_FENCE: &str = "```";
const CLOSING_LINE: &str = "Please review these issues and update, close, or milestone them.";

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One display row of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Issue number; rendered as `#N`.
    pub reference: IssueNumber,

    /// Title truncated to [`MAX_TITLE_CHARS`].
    pub title: String,

    /// Comma-joined member mentions, or the fallback mention. Never empty.
    pub assignees: String,
}

impl ReportRow {
    /// Builds the row for `resolved`, substituting `fallback` when no assignee
    /// is a confirmed organization member.
    pub fn from_resolved(resolved: &ResolvedIssue, fallback: &FallbackMention) -> Self {
        let mentions: Vec<String> = resolved.members().map(|login| login.mention()).collect();
        let assignees = if mentions.is_empty() {
            fallback.as_str().to_string()
        } else {
            mentions.join(", ")
        };

        Self {
            reference: resolved.issue.number,
            title: truncate_title(&resolved.issue.title),
            assignees,
        }
    }

    /// Renders the row as a pipe-table line.
    pub fn render(&self) -> String {
        format!("| {} | {} | {} |", self.reference, self.title, self.assignees)
    }
}

/// Truncates `title` to at most [`MAX_TITLE_CHARS`] characters.
///
/// Longer titles keep their first 37 characters followed by `...`.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_string();
    }
    let keep = MAX_TITLE_CHARS - ELLIPSIS.len();
    let mut truncated: String = title.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Ordered, non-empty sequence of report rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    /// Wraps `rows`, returning `None` if there is nothing to report.
    pub fn from_rows(rows: Vec<ReportRow>) -> Option<Self> {
        if rows.is_empty() {
            None
        } else {
            Some(Self { rows })
        }
    }

    /// Builds one row per resolved issue, preserving input order.
    pub fn build(resolved: &[ResolvedIssue], fallback: &FallbackMention) -> Option<Self> {
        Self::from_rows(
            resolved
                .iter()
                .map(|issue| ReportRow::from_resolved(issue, fallback))
                .collect(),
        )
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the chat message for this report.
    ///
    /// Layout: bold header, blank line, fenced pipe-table, blank line, closing line.
    pub fn render_message(&self, repository: &RepositoryId) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 8);
        lines.push(format!("*Stale issues in {repository} need attention*"));
        lines.push(String::new());
        lines.push(CODE_FENCE.to_string());
        lines.push(TABLE_HEADER.to_string());
        lines.push(TABLE_SEPARATOR.to_string());
        lines.extend(self.rows.iter().map(ReportRow::render));
        lines.push(CODE_FENCE.to_string());
        lines.push(String::new());
        lines.push(CLOSING_LINE.to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{Issue, Login, Membership, ResolvedAssignee, Timestamp};

    fn fallback() -> FallbackMention {
        FallbackMention::new("@triage").unwrap()
    }

    fn resolved(number: u64, title: &str, assignees: &[(&str, Membership)]) -> ResolvedIssue {
        let assignees: Vec<ResolvedAssignee> = assignees
            .iter()
            .map(|(login, membership)| ResolvedAssignee {
                login: Login::new(*login).unwrap(),
                membership: *membership,
            })
            .collect();
        ResolvedIssue {
            issue: Issue {
                number: IssueNumber::new(number),
                title: title.to_string(),
                updated_at: Timestamp::from_utc(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
                assignees: assignees.iter().map(|a| a.login.clone()).collect(),
                is_pull_request: false,
            },
            assignees,
        }
    }

    #[test]
    fn long_titles_are_cut_to_forty_characters() {
        let title = "a".repeat(50);
        let truncated = truncate_title(&title);
        assert_eq!(truncated, format!("{}...", "a".repeat(37)));
        assert_eq!(truncated.chars().count(), 40);
    }

    #[test]
    fn titles_up_to_forty_characters_are_unchanged() {
        let exact = "b".repeat(40);
        assert_eq!(truncate_title(&exact), exact);
        assert_eq!(truncate_title("short"), "short");
        assert_eq!(truncate_title(""), "");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let title = "é".repeat(45);
        let truncated = truncate_title(&title);
        assert_eq!(truncated.chars().count(), 40);
        assert!(truncated.starts_with(&"é".repeat(37)));
    }

    #[test]
    fn only_confirmed_members_are_mentioned() {
        let issue = resolved(
            1,
            "Flaky test",
            &[("alice", Membership::Member), ("bob", Membership::NotMember)],
        );
        assert_eq!(ReportRow::from_resolved(&issue, &fallback()).assignees, "@alice");
    }

    #[test]
    fn multiple_members_are_comma_joined_in_assignee_order() {
        let issue = resolved(
            1,
            "Flaky test",
            &[
                ("dave", Membership::Member),
                ("erin", Membership::Unknown),
                ("alice", Membership::Member),
            ],
        );
        assert_eq!(
            ReportRow::from_resolved(&issue, &fallback()).assignees,
            "@dave, @alice"
        );
    }

    #[test]
    fn fallback_is_used_without_confirmed_members() {
        let unassigned = resolved(2, "Nobody home", &[]);
        let outsiders = resolved(
            3,
            "Outside help",
            &[("mallory", Membership::NotMember), ("oscar", Membership::Unknown)],
        );
        assert_eq!(ReportRow::from_resolved(&unassigned, &fallback()).assignees, "@triage");
        assert_eq!(ReportRow::from_resolved(&outsiders, &fallback()).assignees, "@triage");
    }

    #[test]
    fn empty_input_means_nothing_to_report() {
        assert!(Report::build(&[], &fallback()).is_none());
    }

    #[test]
    fn report_keeps_input_order() {
        let issues = vec![resolved(9, "Nine", &[]), resolved(2, "Two", &[])];
        let report = Report::build(&issues, &fallback()).unwrap();
        let refs: Vec<u64> = report.rows().iter().map(|r| r.reference.as_u64()).collect();
        assert_eq!(refs, vec![9, 2]);
    }

    #[test]
    fn message_has_header_table_and_closing_line() {
        let issues = vec![resolved(
            42,
            "Totally broken thing that needs fixing urgently today",
            &[("carol", Membership::Member)],
        )];
        let report = Report::build(&issues, &fallback()).unwrap();
        let repo = RepositoryId::new("acme/widgets").unwrap();

        let expected = "*Stale issues in acme/widgets need attention*\n\
            \n\
            ```\n\
            | Issue | Title | Assignees |\n\
            | --- | --- | --- |\n\
            | #42 | Totally broken thing that needs fixin... | @carol |\n\
            ```\n\
            \n\
            Please review these issues and update, close, or milestone them.";
        assert_eq!(report.render_message(&repo), expected);
    }

    #[test]
    fn rendering_is_repeatable() {
        let issues = vec![
            resolved(1, "One", &[("alice", Membership::Member)]),
            resolved(2, &"x".repeat(60), &[]),
        ];
        let repo = RepositoryId::new("acme/widgets").unwrap();
        let first = Report::build(&issues, &fallback()).unwrap().render_message(&repo);
        let second = Report::build(&issues, &fallback()).unwrap().render_message(&repo);
        assert_eq!(first, second);
    }
}
