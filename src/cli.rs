use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::run::execute;

/// CLI for repo-cache: snapshot an organization's repositories to S3.
#[derive(Parser)]
#[clap(
    name = "repo-cache",
    version,
    about = "Publish a public JSON snapshot of a GitHub organization's repositories to S3"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all repositories for the configured organization and publish the snapshot
    Publish,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Publish => match execute().await {
            Ok(report) => {
                println!(
                    "Published {} repositories of {} to s3://{}/{}",
                    report.repositories, report.organization, report.bucket, report.key
                );
                Ok(())
            }
            Err(e) => {
                eprintln!("[ERROR] Publish failed: {e}");
                Err(e.into())
            }
        },
    }
}
