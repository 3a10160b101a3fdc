//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use marginalia_core::config::defaults;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating pipeline configuration template...");
        println!("  Output file: {}", self.output.display());

        std::fs::write(&self.output, generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file to tune the pipeline");
        println!("2. Validate your configuration:");
        println!("   marginalia validate -c {}", self.output.display());
        println!("3. Use it for rendering:");
        println!(
            "   marginalia render -i bundle.json -c {}",
            self.output.display()
        );

        Ok(())
    }
}

/// Template with every setting at its default value
fn generate_template() -> String {
    format!(
        r#"# marginalia pipeline configuration

[reconciler]
# Which occurrence of the quoted text to use when the offsets are wrong:
# "leftmost" takes the first one, "nearest" the one closest to the
# reported offset
anchor_search = "leftmost"

# Walk limits, in characters, for snapping annotations to boundaries
[normalizer]
# Sentence policy: how far start may move back to the sentence start
sentence_backward_limit = {backward}
# Sentence policy: how far end may move forward to the sentence end
sentence_forward_limit = {forward}
# Sentence policy: how far end may move to finish a cut word
word_completion_limit = {completion}
# Precise policy: how far either boundary may move to a word edge
precise_word_limit = {precise}

[segments]
# Which annotations get a terminal marker where they end:
# "validation" or "all"
mark_terminal = "validation"
"#,
        backward = defaults::SENTENCE_BACKWARD_LIMIT,
        forward = defaults::SENTENCE_FORWARD_LIMIT,
        completion = defaults::WORD_COMPLETION_LIMIT,
        precise = defaults::PRECISE_WORD_LIMIT,
    )
}
