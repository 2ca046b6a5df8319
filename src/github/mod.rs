pub mod client;
pub mod errors;
pub mod query;
pub mod retry;
pub mod types;

pub use client::{GitHubClient, RepoGateway};
pub use errors::GitHubError;
pub use query::SearchQuery;
