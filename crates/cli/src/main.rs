use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use advisor::{Orchestrator, Submission};
use anyhow::{bail, Result};
use api_client::{ApiConfig, IdentificationClient, WineIdentifier, DEFAULT_BASE_URL};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;
use wine_types::{Vintage, WineCategory};

mod image;
mod prompt;
mod render;

use prompt::TerminalCollector;

/// Wine Advisor - wine recommendations from a photo of a bottle
#[derive(Parser)]
#[command(name = "wine-advisor")]
#[command(about = "Recommend wines from a photo of a bottle", long_about = None)]
struct Cli {
    /// Base URL of the advisor backend
    #[arg(long, env = "WINE_ADVISOR_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Seconds to wait for each service call
    #[arg(long, env = "WINE_ADVISOR_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    /// Log workflow progress to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify a bottle and recommend similar wines
    Advise {
        /// Photo of the bottle (JPG or PNG)
        #[arg(long)]
        image: PathBuf,

        /// Wine type: still-white, still-red, rose, sparkling or fortified
        #[arg(long)]
        category: WineCategory,

        /// Winery to use if the label does not show one
        #[arg(long)]
        winery: Option<String>,

        /// Vintage to use if the label does not show one
        #[arg(long, value_parser = parse_vintage)]
        vintage: Option<Vintage>,

        /// Fail instead of asking for missing fields
        #[arg(long)]
        no_prompt: bool,

        /// Show the similarity distance for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Only read the label and show what was found
    Identify {
        /// Photo of the bottle (JPG or PNG)
        #[arg(long)]
        image: PathBuf,
    },
}

fn parse_vintage(s: &str) -> Result<Vintage, String> {
    let year = s
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("'{}' is not a year", s))?;
    Vintage::new(year).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = ApiConfig::new(cli.api_url.clone())
        .with_timeout(Duration::from_secs(cli.timeout_secs));

    let outcome = match cli.command {
        Commands::Advise {
            image,
            category,
            winery,
            vintage,
            no_prompt,
            explain,
        } => handle_advise(&config, &image, category, winery, vintage, no_prompt, explain).await,
        Commands::Identify { image } => handle_identify(&config, &image).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), format!("{:#}", e).red());
            ExitCode::FAILURE
        }
    }
}

/// Handle the 'advise' command
async fn handle_advise(
    config: &ApiConfig,
    image_path: &Path,
    category: WineCategory,
    winery: Option<String>,
    vintage: Option<Vintage>,
    no_prompt: bool,
    explain: bool,
) -> Result<()> {
    let image = image::load_image(image_path)?;
    let orchestrator = Orchestrator::connect(config)?;

    let mut submission = Submission::with_inputs(image, category);
    let stdin = io::stdin();
    let mut collector =
        TerminalCollector::new(stdin.lock(), io::stdout(), winery, vintage, !no_prompt);

    println!("{}", "Analyzing the image... Please wait.".dimmed());
    let mut state = orchestrator.process(&mut submission, &mut collector).await?;

    // Each pass is one input tick; the collector prompts again for
    // anything still missing
    while !state.is_terminal() {
        if !collector.can_prompt() {
            let missing: Vec<String> = submission
                .missing_fields()
                .iter()
                .map(|f| format!("--{}", f))
                .collect();
            bail!(
                "The label is missing information; provide {}",
                missing.join(" and ")
            );
        }
        state = orchestrator.resume(&mut submission, &mut collector).await?;
    }

    info!("Workflow finished in state {}", state);
    if let Some(record) = submission.resolved_record() {
        render::print_resolved(record);
    }
    render::print_recommendations(submission.recommendations(), explain);
    Ok(())
}

/// Handle the 'identify' command
async fn handle_identify(config: &ApiConfig, image_path: &Path) -> Result<()> {
    let image = image::load_image(image_path)?;
    let client = IdentificationClient::new(config)?;

    let record = client.identify(&image).await?;
    render::print_identification(&record);
    Ok(())
}
