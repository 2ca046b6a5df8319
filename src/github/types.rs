use chrono::{DateTime, Utc};

/// Repository coordinates within an organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repo {
    pub owner: String,
    pub name: String,
}

impl Repo {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Qualified `org/repo` form used by the search API.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Search-result view of an issue or pull request.
///
/// Search returns both kinds; only pull requests carry a head branch, so the
/// branch is resolved later through a canonical PR fetch.
#[derive(Debug, Clone)]
pub struct IssueSummary {
    pub number: u64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub labels: Vec<String>,
    pub is_pull_request: bool,
}

/// Canonical pull request view fetched by number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullSummary {
    pub number: u64,
    pub head_ref: String,
    pub labels: Vec<String>,
}

/// A resolved `heads/<branch>` git reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub branch: String,
    pub sha: String,
}
