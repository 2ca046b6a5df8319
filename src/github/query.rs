use std::fmt;

use chrono::NaiveDate;

use super::types::Repo;

/// Typed builder for GitHub issue-search queries.
///
/// The sweep core composes predicates on this struct and gateway
/// implementations decide how to evaluate them: the live client renders the
/// equivalent search string with [`SearchQuery::build`], test fakes match the
/// predicates directly against in-memory data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub repo: Option<String>,
    pub open_only: bool,
    pub issues_and_pulls: bool,
    pub created_before: Option<NaiveDate>,
    pub label: Option<String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a single repository (`repo:org/name`).
    pub fn in_repo(mut self, repo: &Repo) -> Self {
        self.repo = Some(repo.full_name());
        self
    }

    /// Restrict to open items (`is:open`).
    pub fn open(mut self) -> Self {
        self.open_only = true;
        self
    }

    /// Match both issues and pull requests explicitly
    /// (`(is:issue OR is:pull-request)`).
    pub fn issues_or_pulls(mut self) -> Self {
        self.issues_and_pulls = true;
        self
    }

    /// Restrict to items created strictly before `date` (`created:<date`).
    pub fn created_before(mut self, date: NaiveDate) -> Self {
        self.created_before = Some(date);
        self
    }

    /// Restrict to items carrying `label` (`label:<name>`).
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Render the GitHub search syntax equivalent of the predicates.
    pub fn build(&self) -> String {
        let mut parts = Vec::new();
        if let Some(repo) = &self.repo {
            parts.push(format!("repo:{repo}"));
        }
        if self.open_only {
            parts.push("is:open".to_string());
        }
        if self.issues_and_pulls {
            parts.push("(is:issue OR is:pull-request)".to_string());
        }
        if let Some(date) = self.created_before {
            parts.push(format!("created:<{}", date.format("%Y-%m-%d")));
        }
        if let Some(label) = &self.label {
            parts.push(format!("label:{label}"));
        }
        parts.join(" ")
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
