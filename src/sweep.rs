//! The two action drivers (label, delete) behind one shared traversal over
//! the organization's repositories. Failures local to one repository or one
//! candidate are logged and counted, never fatal to the run.

use std::fmt;

use tracing::{info, warn};

use crate::config::RunConfig;
use crate::github::types::Repo;
use crate::github::{GitHubError, RepoGateway};
use crate::staleness::{stale_candidates, StaleSet};

/// Which side effect a sweep applies to each candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepAction {
    /// Warning phase: apply the warning label to each stale PR.
    Label,
    /// Removal phase: delete each stale PR's head branch reference.
    Delete,
}

/// Counts accumulated over a run and reported at exit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub repos: usize,
    pub candidates: usize,
    pub labeled: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "repos={} candidates={} labeled={} deleted={} skipped={} failed={}",
            self.repos, self.candidates, self.labeled, self.deleted, self.skipped, self.failed
        )
    }
}

/// Drives the label and delete passes over every repository of the
/// organization named in the config. The two public drivers recompute the
/// candidate set independently; neither depends on the other having run.
pub struct BranchManager<'a, G: RepoGateway> {
    gateway: &'a G,
    config: RunConfig,
}

impl<'a, G: RepoGateway> BranchManager<'a, G> {
    pub fn new(gateway: &'a G, config: RunConfig) -> Self {
        info!(
            "BranchManager initialized with args: org_name={}, cutoff={}, dry_run={}",
            config.org, config.cutoff, config.dry_run
        );
        Self { gateway, config }
    }

    /// Warning phase: mark every stale PR with the warning label.
    pub async fn label_stale_branches(&self) -> Result<RunSummary, GitHubError> {
        self.sweep(SweepAction::Label).await
    }

    /// Removal phase: delete the head branch reference of every stale PR.
    pub async fn delete_stale_branches(&self) -> Result<RunSummary, GitHubError> {
        self.sweep(SweepAction::Delete).await
    }

    /// One traversal shared by both drivers: list repositories, run the
    /// staleness filter, dispatch the per-candidate action. Only the
    /// organization listing itself (auth, bad org name) aborts the run.
    async fn sweep(&self, action: SweepAction) -> Result<RunSummary, GitHubError> {
        let mut summary = RunSummary::default();
        let repos = self.gateway.list_org_repos(&self.config.org).await?;

        for repo in &repos {
            summary.repos += 1;
            info!("Processing repository: {}", repo.name);

            match self.gateway.branch_count(repo).await {
                Ok(total) => info!(
                    "Total number of branches in repository '{}': {}",
                    repo.name, total
                ),
                Err(err) => warn!("Could not count branches in '{}': {}", repo.name, err),
            }

            let set = match stale_candidates(self.gateway, &self.config, repo).await {
                Ok(set) => set,
                Err(err) => {
                    warn!("Skipping repository '{}': {}", repo.name, err);
                    summary.failed += 1;
                    continue;
                }
            };
            summary.candidates += set.len();
            summary.skipped += set.skipped_vanished;
            if set.skipped_non_pr > 0 {
                info!(
                    "Skipped {} plain issue(s) without a pull request in '{}'",
                    set.skipped_non_pr, repo.name
                );
            }

            match action {
                SweepAction::Label => self.label_repo(repo, &set, &mut summary).await,
                SweepAction::Delete => self.delete_repo(repo, &set, &mut summary).await,
            }
        }

        info!("Run complete: {}", summary);
        Ok(summary)
    }

    async fn label_repo(&self, repo: &Repo, set: &StaleSet, summary: &mut RunSummary) {
        let mut branches_labeled = Vec::new();

        for pull in &set.pulls {
            // Re-fetch the canonical PR by number; search results can lag
            // behind concurrent merges and deletions.
            let canonical = match self.gateway.get_pull(repo, pull.number).await {
                Ok(pull) => pull,
                Err(err) if err.is_not_found() => {
                    warn!(
                        "PR #{} in repo {} no longer exists, skipping",
                        pull.number, repo.name
                    );
                    summary.skipped += 1;
                    continue;
                }
                Err(err) => {
                    warn!(
                        "Failed to fetch PR #{} in repo {}: {}",
                        pull.number, repo.name, err
                    );
                    summary.failed += 1;
                    continue;
                }
            };

            info!("Applying label on PR {} in repo {}", canonical.number, repo.name);
            if self.config.dry_run {
                summary.labeled += 1;
                branches_labeled.push(canonical.head_ref);
                continue;
            }

            match self
                .gateway
                .add_label(repo, canonical.number, &self.config.warning_label)
                .await
            {
                Ok(()) => {
                    summary.labeled += 1;
                    branches_labeled.push(canonical.head_ref);
                }
                Err(err) if err.is_not_found() => {
                    warn!(
                        "PR #{} in repo {} vanished before labeling, skipping",
                        canonical.number, repo.name
                    );
                    summary.skipped += 1;
                }
                Err(err) => {
                    warn!(
                        "Failed to label PR #{} in repo {}: {}",
                        canonical.number, repo.name, err
                    );
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Branches labeled in repo '{}': {:?}",
            repo.name, branches_labeled
        );
    }

    async fn delete_repo(&self, repo: &Repo, set: &StaleSet, summary: &mut RunSummary) {
        info!(
            "Deleting branches older than {} in repo {} ...",
            self.config.cutoff, repo.name
        );

        for branch in &set.branches {
            let git_ref = match self.gateway.get_branch_ref(repo, branch).await {
                Ok(git_ref) => git_ref,
                Err(err) if err.is_not_found() => {
                    warn!(
                        "Branch '{}' in repo {} already deleted, skipping",
                        branch, repo.name
                    );
                    summary.skipped += 1;
                    continue;
                }
                Err(err) => {
                    warn!(
                        "Failed to resolve branch '{}' in repo {}: {}",
                        branch, repo.name, err
                    );
                    summary.failed += 1;
                    continue;
                }
            };

            // Audit trail: the SHA is logged before the ref goes away.
            info!("branch_name={}, sha={}", git_ref.branch, git_ref.sha);
            if self.config.dry_run {
                summary.deleted += 1;
                continue;
            }

            match self.gateway.delete_branch_ref(repo, branch).await {
                Ok(()) => summary.deleted += 1,
                Err(err) if err.is_not_found() => {
                    warn!(
                        "Branch '{}' in repo {} vanished before deletion, skipping",
                        branch, repo.name
                    );
                    summary.skipped += 1;
                }
                Err(err) => {
                    warn!(
                        "Failed to delete branch '{}' in repo {}: {}",
                        branch, repo.name, err
                    );
                    summary.failed += 1;
                }
            }
        }
    }
}
