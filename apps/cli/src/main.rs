//! partsite CLI — static product catalog site generator.
//!
//! Turns product CSV rows into a deployable set of SEO-ready HTML pages
//! with section listings, a sitemap, and robots.txt.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
