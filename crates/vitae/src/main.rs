//! vitae - command-line resume parser.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vitae::{ExtractorConfig, ResumeParserFramework};

/// Extract name, email and skills from resume documents.
#[derive(Parser, Debug)]
#[command(name = "vitae", version, about = "Resume parsing for PDF and Word documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse one or more resumes and print one JSON document per file.
    Parse {
        /// Resume files (.pdf, .docx, .doc).
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Accept records with missing fields instead of failing.
        #[arg(long)]
        partial: bool,
        /// Configuration file (.toml, .json or .yaml); defaults to the environment.
        #[arg(short, long, env = "VITAE_CONFIG")]
        config: Option<PathBuf>,
        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,
    },
    /// List supported file extensions.
    Extensions,
}

fn load_config(path: Option<&PathBuf>, partial: bool) -> Result<ExtractorConfig> {
    let mut config = match path {
        Some(path) => ExtractorConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ExtractorConfig::from_env(),
    };
    if partial {
        config.allow_partial = true;
    }
    Ok(config)
}

async fn parse_files(
    framework: &ResumeParserFramework,
    files: &[PathBuf],
    compact: bool,
) -> Result<usize> {
    let mut failures = 0;

    for file in files {
        match framework.parse_resume_with_report(file).await {
            Ok(report) => {
                for (field, message) in &report.errors {
                    tracing::warn!(file = %file.display(), field = %field, "{}", message);
                }
                let json = if compact {
                    serde_json::to_string(&report.data)?
                } else {
                    report.data.to_json()?
                };
                println!("{}", json);
            }
            Err(e) => {
                failures += 1;
                eprintln!("{}: {} [{}]", file.display(), e, e.code().as_str());
                if let Some(hint) = e.suggestion() {
                    eprintln!("  hint: {}", hint);
                }
            }
        }
    }

    Ok(failures)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            files,
            partial,
            config,
            compact,
        } => {
            let config = load_config(config.as_ref(), partial)?;
            let framework = ResumeParserFramework::new(config)?;

            let failures = parse_files(&framework, &files, compact).await?;
            if failures > 0 {
                tracing::error!(failures, total = files.len(), "Some resumes could not be parsed");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Extensions => {
            let framework = ResumeParserFramework::new(ExtractorConfig::default())?;
            for extension in framework.supported_extensions() {
                println!("{}", extension);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
