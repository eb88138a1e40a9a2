//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use partsite_core::{BuildResult, ProgressReporter, build_site};
use partsite_shared::{
    AppConfig, BuildConfig, CONFIG_FILE_NAME, init_config, load_config, validate_config,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// partsite — generate a static product catalog site from CSV data.
#[derive(Parser)]
#[command(
    name = "partsite",
    version,
    about = "Generate a static, SEO-ready product catalog site from CSV data.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Build the site from the configured CSV inputs.
    Build {
        /// Config file path (defaults to ./partsite.toml).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (overrides the config file).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Products CSV path (overrides the config file).
        #[arg(short, long)]
        products: Option<PathBuf>,

        /// Cap the number of product rows, for test runs.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize a partsite.toml with defaults in the current directory.
    Init,
    /// Show the resolved configuration.
    Show {
        /// Config file path (defaults to ./partsite.toml).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "partsite=info",
        1 => "partsite=debug",
        _ => "partsite=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build {
            config,
            out,
            products,
            limit,
        } => cmd_build(config.as_deref(), out, products, limit),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show { config } => cmd_config_show(config.as_deref()),
        },
    }
}

fn cmd_build(
    config_path: Option<&std::path::Path>,
    out: Option<PathBuf>,
    products: Option<PathBuf>,
    limit: Option<usize>,
) -> Result<()> {
    let default_path = PathBuf::from(CONFIG_FILE_NAME);
    let config = load_config(config_path.unwrap_or(&default_path))?;
    validate_config(&config)?;

    let mut build = BuildConfig::from(&config);
    if let Some(out) = out {
        build.output_dir = out;
    }
    if let Some(products) = products {
        build.products_csv = products;
    }
    if let Some(limit) = limit {
        build.row_limit = (limit > 0).then_some(limit);
    }

    if !build.products_csv.is_file() {
        return Err(eyre!(
            "products CSV not found at '{}'",
            build.products_csv.display()
        ));
    }

    info!(
        products = %build.products_csv.display(),
        out = %build.output_dir.display(),
        "building site"
    );

    let started = std::time::Instant::now();
    let reporter = CliProgress::new();
    let result = build_site(&build, &reporter)?;

    println!();
    println!("  Site built successfully!");
    println!("  Pages:    {}", result.pages_written);
    println!("  Sections: {}", result.sections_written);
    println!("  Sitemap:  {} URLs", result.sitemap_urls);
    println!("  Output:   {}", result.output_dir.display());
    println!("  Time:     {:.1}s", started.elapsed().as_secs_f64());
    println!();

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let cwd = std::env::current_dir()?;
    let path = init_config(&cwd)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&std::path::Path>) -> Result<()> {
    let default_path = PathBuf::from(CONFIG_FILE_NAME);
    let config: AppConfig = load_config(config_path.unwrap_or(&default_path))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn page_written(&self, slug: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Rendering [{current}/{total}] {slug}"));
    }

    fn done(&self, _result: &BuildResult) {
        self.spinner.finish_and_clear();
    }
}
