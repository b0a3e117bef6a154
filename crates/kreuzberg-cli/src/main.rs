#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use kreuzberg::{ExtractionConfig, KreuzbergError, OcrConfig, TesseractConfig, extract_file_sync};
use serde_json::json;

/// Kreuzberg document intelligence CLI
#[derive(Parser)]
#[command(name = "kreuzberg")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract content from a document
    Extract {
        /// Path to the document
        path: PathBuf,

        /// OCR backend to enable (omit to leave OCR disabled)
        #[arg(long, value_enum)]
        ocr_backend: Option<OcrBackendArg>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        output_format: OutputFormatArg,

        /// Path to a kreuzberg.toml config file (falls back to project discovery)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OcrBackendArg {
    Tesseract,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormatArg {
    Text,
    Markdown,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(0),
        Err(KreuzbergError::Validation { message, .. }) => {
            eprintln!("kreuzberg: validation error: {message}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("kreuzberg: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> kreuzberg::Result<()> {
    match cli.command {
        Commands::Extract {
            path,
            ocr_backend,
            output_format,
            config,
        } => extract(path, ocr_backend, output_format, config),
    }
}

fn extract(
    path: PathBuf,
    ocr_backend: Option<OcrBackendArg>,
    output_format: OutputFormatArg,
    config_path: Option<PathBuf>,
) -> kreuzberg::Result<()> {
    let mut extraction_config = match config_path {
        Some(path) => ExtractionConfig::from_toml_file(&path)?,
        None => ExtractionConfig::discover()?.unwrap_or_default(),
    };

    if let Some(OcrBackendArg::Tesseract) = ocr_backend {
        extraction_config.ocr.get_or_insert_with(|| {
            OcrConfig::Tesseract(TesseractConfig {
                output_format: if output_format == OutputFormatArg::Markdown {
                    "markdown".to_string()
                } else {
                    "text".to_string()
                },
                ..TesseractConfig::default()
            })
        });
    }

    let path_str = path.to_string_lossy().to_string();
    let result = extract_file_sync(&path_str, None, &extraction_config)?;

    match output_format {
        OutputFormatArg::Text | OutputFormatArg::Markdown => {
            println!("{}", result.content);
        }
        OutputFormatArg::Json => {
            let output = json!({
                "content": result.content,
                "mime_type": result.mime_type,
                "metadata": result.metadata,
                "tables": result.tables,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
