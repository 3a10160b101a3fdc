//! Validate command implementation

use anyhow::Result;
use clap::Args;
use marginalia_core::PipelineConfig;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to pipeline configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!(
            "Validating pipeline configuration: {}",
            self.config.display()
        );

        match PipelineConfig::from_file(&self.config) {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                println!("  Anchor search: {:?}", config.reconciler.anchor_search);
                println!(
                    "  Sentence limits: {} back, {} forward",
                    config.normalizer.sentence_backward_limit,
                    config.normalizer.sentence_forward_limit
                );
                println!("  Terminal markers: {:?}", config.segments.mark_terminal);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
