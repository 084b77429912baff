//! Uptime check reconciler entry point
//!
//! # Exit Codes
//!
//! - 0: Success, including runs where individual create/update requests failed
//! - 1: Config, inventory or check-list failure

use clap::Parser;
use linode_uptime::cli::{init_tracing, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level());

    let options = cli.run_options();
    linode_uptime::run(&options, &mut std::io::stdout().lock()).await?;

    Ok(())
}
