//! Render command implementation

use crate::error::CliError;
use crate::input::{resolve_patterns, Bundle};
use crate::output::{JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter};
use anyhow::{Context, Result};
use clap::Args;
use marginalia_api::{AnnotationProcessor, Config, Output};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the render command
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Input bundles or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Pipeline configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per segment with its covering categories
    Text,
    /// JSON array of rendered documents
    Json,
    /// Inline highlights with footnoted notes
    Markdown,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting annotation rendering");
        log::debug!("Arguments: {:?}", self);

        let processor = self.build_processor()?;
        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} bundle(s) to render", files.len());

        // Bundles are independent; collect keeps them in input order
        let documents = files
            .par_iter()
            .map(|path| {
                let output = Bundle::load(path)?
                    .render(&processor)
                    .with_context(|| format!("Failed to render {}", path.display()))?;
                Ok((path.display().to_string(), output))
            })
            .collect::<Result<Vec<(String, Output)>>>()?;

        let mut formatter = self.create_formatter()?;
        for (source, output) in &documents {
            log::debug!(
                "{}: {} segment(s), {} annotation(s) kept",
                source,
                output.metadata.segment_count,
                output.metadata.annotations_kept
            );
            formatter.format_document(source, output)?;
        }
        formatter.finish()?;

        log::info!("Rendered {} bundle(s)", documents.len());
        Ok(())
    }

    /// Build the processor, loading pipeline settings from `--config`
    fn build_processor(&self) -> Result<AnnotationProcessor> {
        let mut builder = Config::builder();
        if let Some(path) = &self.config {
            builder = builder
                .pipeline_file(path)
                .map_err(|e| CliError::ConfigError(e.to_string()))?;
        }
        let config = builder
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(AnnotationProcessor::with_config(config)?)
    }

    /// Create the formatter for the selected format and destination
    fn create_formatter(&self) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        Ok(match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when run more than once in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}
