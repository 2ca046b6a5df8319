use async_trait::async_trait;
use octocrab::params::repos::Reference;
use octocrab::Octocrab;

use super::errors::GitHubError;
use super::query::SearchQuery;
use super::retry::{with_retry, RetryConfig};
use super::types::{BranchRef, IssueSummary, PullSummary, Repo};

/// Remote repository operations the sweep core depends on.
///
/// The core never talks to octocrab directly; it goes through this trait so
/// tests can substitute an in-memory gateway and the staleness logic stays
/// independent of the live API.
#[async_trait]
pub trait RepoGateway: Send + Sync {
    /// Repositories of an organization, in the order the API lists them.
    async fn list_org_repos(&self, org: &str) -> Result<Vec<Repo>, GitHubError>;

    /// Issues and pull requests matching the query, in search-result order.
    async fn search_issues(&self, query: &SearchQuery) -> Result<Vec<IssueSummary>, GitHubError>;

    /// Canonical pull request by number.
    async fn get_pull(&self, repo: &Repo, number: u64) -> Result<PullSummary, GitHubError>;

    /// Apply a label to a pull request. Re-applying an existing label is a
    /// no-op on the GitHub side.
    async fn add_label(&self, repo: &Repo, number: u64, label: &str) -> Result<(), GitHubError>;

    /// Total branch count for a repository. Informational only.
    async fn branch_count(&self, repo: &Repo) -> Result<usize, GitHubError>;

    /// Resolve the live `heads/<branch>` reference.
    async fn get_branch_ref(&self, repo: &Repo, branch: &str) -> Result<BranchRef, GitHubError>;

    /// Delete the `heads/<branch>` reference. Removes the pointer only, not
    /// repository history.
    async fn delete_branch_ref(&self, repo: &Repo, branch: &str) -> Result<(), GitHubError>;
}

/// Production gateway backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
    retry: RetryConfig,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self, GitHubError> {
        if token.trim().is_empty() {
            return Err(GitHubError::TokenNotFound(
                "GitHub token is empty; pass --github-token or set GITHUB_TOKEN".to_string(),
            ));
        }

        let octocrab = Octocrab::builder()
            .personal_token(token.to_string())
            .build()?;

        Ok(Self {
            octocrab,
            retry: RetryConfig::default(),
        })
    }
}

#[async_trait]
impl RepoGateway for GitHubClient {
    async fn list_org_repos(&self, org: &str) -> Result<Vec<Repo>, GitHubError> {
        let repos = with_retry(&self.retry, "list organization repositories", || async move {
            let page = self.octocrab.orgs(org).list_repos().send().await?;
            Ok(self.octocrab.all_pages(page).await?)
        })
        .await?;

        Ok(repos
            .into_iter()
            .map(|repo| Repo::new(org, repo.name))
            .collect())
    }

    async fn search_issues(&self, query: &SearchQuery) -> Result<Vec<IssueSummary>, GitHubError> {
        let rendered = query.build();
        let rendered = rendered.as_str();
        let issues = with_retry(&self.retry, "issue search", || async move {
            let page = self
                .octocrab
                .search()
                .issues_and_pull_requests(rendered)
                .send()
                .await?;
            Ok(self.octocrab.all_pages(page).await?)
        })
        .await?;

        Ok(issues
            .into_iter()
            .map(|issue| IssueSummary {
                number: issue.number,
                title: issue.title,
                created_at: issue.created_at,
                labels: issue.labels.into_iter().map(|label| label.name).collect(),
                is_pull_request: issue.pull_request.is_some(),
            })
            .collect())
    }

    async fn get_pull(&self, repo: &Repo, number: u64) -> Result<PullSummary, GitHubError> {
        let pull = self
            .octocrab
            .pulls(&repo.owner, &repo.name)
            .get(number)
            .await?;

        Ok(PullSummary {
            number: pull.number,
            head_ref: pull.head.ref_field.clone(),
            labels: pull
                .labels
                .as_ref()
                .map(|labels| labels.iter().map(|label| label.name.clone()).collect())
                .unwrap_or_default(),
        })
    }

    async fn add_label(&self, repo: &Repo, number: u64, label: &str) -> Result<(), GitHubError> {
        self.octocrab
            .issues(&repo.owner, &repo.name)
            .add_labels(number, &[label.to_string()])
            .await?;
        Ok(())
    }

    // The count is informational only; one item per page keeps this to a
    // single request, with the total read off the `last` pagination link.
    async fn branch_count(&self, repo: &Repo) -> Result<usize, GitHubError> {
        let page = with_retry(&self.retry, "list branches", || async move {
            Ok(self
                .octocrab
                .repos(&repo.owner, &repo.name)
                .list_branches()
                .per_page(1)
                .send()
                .await?)
        })
        .await?;

        Ok(page
            .last
            .as_ref()
            .and_then(|uri| uri.query())
            .and_then(last_page_number)
            .unwrap_or_else(|| page.items.len()))
    }

    async fn get_branch_ref(&self, repo: &Repo, branch: &str) -> Result<BranchRef, GitHubError> {
        let git_ref = self
            .octocrab
            .repos(&repo.owner, &repo.name)
            .get_ref(&Reference::Branch(branch.to_string()))
            .await?;

        let sha = match git_ref.object {
            octocrab::models::repos::Object::Commit { sha, .. } => sha,
            octocrab::models::repos::Object::Tag { sha, .. } => sha,
            _ => return Err(GitHubError::NotACommit(branch.to_string())),
        };

        Ok(BranchRef {
            branch: branch.to_string(),
            sha,
        })
    }

    async fn delete_branch_ref(&self, repo: &Repo, branch: &str) -> Result<(), GitHubError> {
        self.octocrab
            .repos(&repo.owner, &repo.name)
            .delete_ref(&Reference::Branch(branch.to_string()))
            .await?;
        Ok(())
    }
}

/// Page number carried by a pagination link's query string. With one item per
/// page, the `last` link's page number equals the total item count.
fn last_page_number(query: &str) -> Option<usize> {
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page=")?.parse().ok())
}
