use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use branch_reaper::config::RunConfig;
use branch_reaper::github::GitHubClient;
use branch_reaper::sweep::BranchManager;
use branch_reaper::telemetry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Apply the warning label to stale PRs (the warn phase)
    Label,
    /// Delete the head branches of stale PRs (the remove phase)
    Delete,
}

#[derive(Parser)]
#[command(name = "branch-reaper")]
#[command(about = "Labels and deletes stale GitHub branches across an organization")]
#[command(long_about = "Branch Reaper finds open PRs older than a cutoff in every repository of an \
                       organization and either labels them as pending deletion or deletes their \
                       head branches. PRs carrying the 'do-not-delete' label are always excluded. \
                       Both actions are idempotent and safe to re-run.")]
struct Cli {
    /// GitHub token used for authentication (defaults to $GITHUB_TOKEN)
    #[arg(long)]
    github_token: Option<String>,

    /// Action to perform
    #[arg(long, value_enum, default_value_t = Action::Label)]
    action: Action,

    /// GitHub organization whose stale branches are to be managed
    #[arg(long)]
    org_name: String,

    /// Age cutoff in months: only open PRs created before now minus this many
    /// months are considered stale
    #[arg(long, default_value_t = 12)]
    date_period: u32,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Run all queries and log what would happen, but make no mutating calls
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    telemetry::init_logging(cli.debug);

    let token = cli
        .github_token
        .or_else(|| std::env::var("GITHUB_TOKEN").ok())
        .context("GitHub token not provided; pass --github-token or set GITHUB_TOKEN")?;

    let config = RunConfig::new(&cli.org_name, cli.date_period, cli.dry_run);
    let client = GitHubClient::new(&token)?;
    let manager = BranchManager::new(&client, config);

    let summary = match cli.action {
        Action::Label => manager.label_stale_branches().await?,
        Action::Delete => manager.delete_stale_branches().await?,
    };

    if cli.dry_run {
        println!("Dry run: no labels were applied and no branches were deleted.");
    }
    println!("{summary}");
    Ok(())
}
