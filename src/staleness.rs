//! The staleness filter: decides, per repository, which pull requests (and
//! therefore which head branches) are eligible for the label and delete
//! passes. Read-only; side effects live in [`crate::sweep`].

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::github::types::{PullSummary, Repo};
use crate::github::{GitHubError, RepoGateway, SearchQuery};

/// Candidates computed for one repository.
///
/// `pulls` and `branches` are index-aligned: `branches[i]` is the head branch
/// of `pulls[i]`. Order follows the "older" search result, filtered in place.
#[derive(Debug, Clone, Default)]
pub struct StaleSet {
    pub pulls: Vec<PullSummary>,
    pub branches: Vec<String>,
    /// Plain issues (no PR form) that matched the age query and were skipped.
    pub skipped_non_pr: usize,
    /// PRs that vanished between the search and the canonical fetch.
    pub skipped_vanished: usize,
}

impl StaleSet {
    pub fn len(&self) -> usize {
        self.pulls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulls.is_empty()
    }
}

/// Compute the stale candidates for `repo`.
///
/// Two searches: open items created strictly before the cutoff ("older"), and
/// the subset of those carrying the protective label ("protected"). The
/// candidate set is older minus protected, compared by issue number so that
/// separately fetched instances of the same issue still cancel out. Each
/// surviving pull request is resolved to its canonical form to obtain the
/// head branch; plain issues are skipped and counted.
pub async fn stale_candidates<G: RepoGateway>(
    gateway: &G,
    config: &RunConfig,
    repo: &Repo,
) -> Result<StaleSet, GitHubError> {
    let older_query = SearchQuery::new()
        .in_repo(repo)
        .open()
        .issues_or_pulls()
        .created_before(config.cutoff);
    let protected_query = SearchQuery::new()
        .in_repo(repo)
        .open()
        .created_before(config.cutoff)
        .with_label(&config.protective_label);

    let older = gateway.search_issues(&older_query).await?;
    let protected = gateway.search_issues(&protected_query).await?;
    let protected_numbers: HashSet<u64> = protected.iter().map(|issue| issue.number).collect();

    info!("Getting branches to be deleted in repo {} ...", repo.name);

    let mut set = StaleSet::default();
    for issue in older {
        if protected_numbers.contains(&issue.number) {
            debug!(
                "Issue #{} in {} carries '{}', excluded",
                issue.number,
                repo.full_name(),
                config.protective_label
            );
            continue;
        }
        if !issue.is_pull_request {
            debug!(
                "Issue #{} in {} is not a pull request, skipping",
                issue.number,
                repo.full_name()
            );
            set.skipped_non_pr += 1;
            continue;
        }
        let pull = match gateway.get_pull(repo, issue.number).await {
            Ok(pull) => pull,
            Err(err) if err.is_not_found() => {
                warn!(
                    "PR #{} in {} vanished between search and fetch, skipping",
                    issue.number,
                    repo.full_name()
                );
                set.skipped_vanished += 1;
                continue;
            }
            Err(err) => return Err(err),
        };
        set.branches.push(pull.head_ref.clone());
        set.pulls.push(pull);
    }

    debug_assert_eq!(set.pulls.len(), set.branches.len());
    Ok(set)
}
