//! CLI command implementations

use clap::Subcommand;
use marginalia_core::Category;

pub mod generate_config;
pub mod render;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render annotation bundles as segmented text
    Render(render::RenderArgs),

    /// Generate a pipeline configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Validate a pipeline configuration file
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List annotation categories in priority order
    Categories,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Print the requested listing
    pub fn execute(&self) {
        match self {
            ListCommands::Categories => {
                println!("Annotation categories (most important first):");
                for category in Category::known() {
                    println!(
                        "  {:<14} priority {}, {:?} boundaries",
                        category.as_str(),
                        category.priority(),
                        category.policy()
                    );
                }
                println!("  (other)        priority 3, Sentence boundaries");
            }
            ListCommands::Formats => {
                println!("Output formats:");
                println!("  text      One line per segment with covering categories");
                println!("  json      JSON array of rendered documents");
                println!("  markdown  Inline highlights with footnoted notes");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_debug_format() {
        let render_cmd = Commands::Render(render::RenderArgs {
            input: vec!["story.json".to_string()],
            output: None,
            format: render::OutputFormat::Markdown,
            config: None,
            quiet: false,
            verbose: 0,
        });

        let debug_str = format!("{:?}", render_cmd);
        assert!(debug_str.contains("Render"));
        assert!(debug_str.contains("story.json"));
        assert!(debug_str.contains("Markdown"));

        let list_cmd = Commands::List {
            subcommand: ListCommands::Categories,
        };

        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Categories"));
    }

    #[test]
    fn test_list_commands_variants() {
        let debug_str = format!("{:?}", ListCommands::Formats);
        assert!(debug_str.contains("Formats"));

        // Listing only prints
        ListCommands::Categories.execute();
        ListCommands::Formats.execute();
    }
}
