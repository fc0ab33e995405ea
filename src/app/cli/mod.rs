//! CLI Adapter.

mod generate;
mod inspect;
mod outline;
mod review;

use std::error::Error as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::domain::{AppError, Usage};

#[derive(Parser)]
#[command(name = "slidegen")]
#[command(version)]
#[command(
    about = "Turn free text into a PowerPoint deck built on a template's layouts",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to ./slidegen.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a template and write its layout schema catalog
    #[clap(visible_alias = "i")]
    Inspect {
        /// Template file (.pptx or .potx)
        template: PathBuf,
        /// Output JSON path
        output: Option<PathBuf>,
    },
    /// Plan a slide outline for an input text
    #[clap(visible_alias = "o")]
    Outline {
        /// Template file (.pptx or .potx)
        template: PathBuf,
        /// Input text file
        input: PathBuf,
        /// Output JSON path
        output: Option<PathBuf>,
        /// Target number of slides
        #[arg(short, long)]
        slides: Option<usize>,
        /// Saved schema catalog to use instead of analyzing the template
        #[arg(long)]
        schemas: Option<PathBuf>,
    },
    /// Generate a presentation from an input text
    #[clap(visible_alias = "g")]
    Generate {
        /// Template file (.pptx or .potx)
        template: PathBuf,
        /// Input text file
        input: PathBuf,
        /// Output .pptx path
        output: Option<PathBuf>,
        /// Target number of slides
        #[arg(short, long)]
        slides: Option<usize>,
        /// Skip rendering and review
        #[arg(long)]
        no_review: bool,
        /// Saved schema catalog to use instead of analyzing the template
        #[arg(long)]
        schemas: Option<PathBuf>,
    },
    /// Review exported slide images against the input text
    #[clap(visible_alias = "r")]
    Review {
        /// Input text file
        input: PathBuf,
        /// Directory holding the slide images
        slides_dir: PathBuf,
        /// Outline JSON written by `outline` or `generate`
        #[arg(long)]
        outline: Option<PathBuf>,
        /// Output JSON path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.config.as_deref();

    let result: Result<(), AppError> = match cli.command {
        Commands::Inspect { template, output } => inspect::run_inspect(&template, output),
        Commands::Outline { template, input, output, slides, schemas } => {
            outline::run_outline(config, template, input, output, slides, schemas)
        }
        Commands::Generate { template, input, output, slides, no_review, schemas } => {
            generate::run_generate(config, template, input, output, slides, !no_review, schemas)
        }
        Commands::Review { input, slides_dir, outline, output } => {
            review::run_review(config, input, slides_dir, outline, output)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn print_usage(usage: &Usage, estimated_cost: f64) {
    println!(
        "  Tokens: {} ({} prompt, {} completion) over {} call(s)",
        usage.total_tokens, usage.prompt_tokens, usage.completion_tokens, usage.calls
    );
    println!("  Estimated cost: ${:.4}", estimated_cost);
}
