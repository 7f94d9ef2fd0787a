//! CLI entry point for the grid puzzle search client

use clap::Parser;
use gridplan::io::cli::{Cli, PlannerClient};

fn main() -> gridplan::Result<()> {
    let cli = Cli::parse();
    let client = PlannerClient::new(cli);
    client.run()
}
