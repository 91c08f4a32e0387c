//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally interchanging, for example,
//! an [`OrganizationId`] with a [`Login`] even though both are strings under the
//! hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty
            /// or whitespace only. Surrounding whitespace is trimmed.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                let v = v.trim();
                if v.is_empty() { None } else { Some(Self(v.to_string())) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — tracker-integer-backed
// ---------------------------------------------------------------------------

/// Identifies an issue within the tracked repository.
///
/// Wraps the issue number assigned by the tracker (positive integer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates a new identifier from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single report run (one invocation of the job).
///
/// Generated fresh for every invocation and recorded on the root span so all
/// activity from a single run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportRunId(Uuid);

impl ReportRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ReportRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed
// ---------------------------------------------------------------------------

/// Identifies a tracker repository in `"owner/name"` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryId {
    owner: String,
    name: String,
}

impl RepositoryId {
    /// Parses an `"owner/name"` string.
    ///
    /// Returns `None` unless the value contains exactly one `/` with a
    /// non-empty segment on each side.
    pub fn new(value: impl AsRef<str>) -> Option<Self> {
        let (owner, name) = value.as_ref().trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// The account (user or organization) that owns the repository.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name without its owner.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

string_id! {
    /// Identifies the organization whose membership decides who gets mentioned.
    ///
    /// Defaults to the owner of the tracked repository.
    OrganizationId
}

impl From<&RepositoryId> for OrganizationId {
    fn from(repository: &RepositoryId) -> Self {
        Self(repository.owner().to_string())
    }
}

string_id! {
    /// A tracker account login (e.g. `"octocat"`), without the leading `@`.
    Login
}

impl Login {
    /// Renders the login as a chat mention (`@login`).
    pub fn mention(&self) -> String {
        format!("@{}", self.0)
    }
}

string_id! {
    /// Identifies the chat channel the report is delivered to.
    ChannelId
}

string_id! {
    /// The mention used in a report row when no assignee is a confirmed
    /// organization member (e.g. `"@here"` or `"@triage-team"`).
    ///
    /// Rendered verbatim.
    FallbackMention
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_id_splits_owner_and_name() {
        let repo = RepositoryId::new("acme/widgets").unwrap();
        assert_eq!(repo.owner(), "acme");
        assert_eq!(repo.name(), "widgets");
        assert_eq!(repo.to_string(), "acme/widgets");
    }

    #[test]
    fn repository_id_rejects_malformed_values() {
        for value in ["", "acme", "/widgets", "acme/", "acme/widgets/extra"] {
            assert!(RepositoryId::new(value).is_none(), "accepted {value:?}");
        }
    }

    #[test]
    fn organization_defaults_to_repository_owner() {
        let repo = RepositoryId::new("acme/widgets").unwrap();
        assert_eq!(OrganizationId::from(&repo).as_str(), "acme");
    }

    #[test]
    fn string_ids_reject_blank_values_and_trim() {
        assert!(Login::new("   ").is_none());
        assert_eq!(Login::new(" carol ").unwrap().as_str(), "carol");
    }

    #[test]
    fn login_renders_as_mention() {
        assert_eq!(Login::new("carol").unwrap().mention(), "@carol");
    }

    #[test]
    fn issue_number_displays_with_hash_prefix() {
        assert_eq!(IssueNumber::new(42).to_string(), "#42");
    }
}
