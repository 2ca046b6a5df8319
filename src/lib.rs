// Branch Reaper - stale branch management for GitHub organizations
// This exposes the core components for testing and integration

pub mod config;
pub mod github;
pub mod staleness;
pub mod sweep;
pub mod telemetry;

// Re-export key types for easy access
pub use config::RunConfig;
pub use github::{GitHubClient, GitHubError, RepoGateway, SearchQuery};
pub use staleness::{stale_candidates, StaleSet};
pub use sweep::{BranchManager, RunSummary, SweepAction};
