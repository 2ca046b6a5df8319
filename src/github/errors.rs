use octocrab::Error as OctocrabError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub token not found: {0}")]
    TokenNotFound(String),

    #[error("GitHub API error: {0}")]
    ApiError(#[from] OctocrabError),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("git reference 'heads/{0}' does not point at a commit")]
    NotACommit(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl GitHubError {
    /// True when the underlying API call came back 404. Not-found during a
    /// sweep means the object vanished between query and action (concurrent
    /// merge or delete) and is handled as a logged skip, never a run failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            GitHubError::NotFound(_) => true,
            GitHubError::ApiError(OctocrabError::GitHub { source, .. }) => {
                source.status_code.as_u16() == 404
            }
            _ => false,
        }
    }

    /// Errors worth a bounded retry: server-side failures, rate limiting, and
    /// connection-level faults. Auth and validation errors are not retryable.
    pub fn is_transient(&self) -> bool {
        match self {
            GitHubError::ApiError(OctocrabError::GitHub { source, .. }) => {
                let status = source.status_code.as_u16();
                status == 429 || (500..=599).contains(&status)
            }
            GitHubError::ApiError(OctocrabError::Http { .. }) => true,
            GitHubError::ApiError(_) => false,
            GitHubError::IoError(_) => true,
            GitHubError::TokenNotFound(_)
            | GitHubError::NotACommit(_)
            | GitHubError::NotFound(_) => false,
        }
    }
}
