//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Database Layering - repository and criteria scaffolding
#[derive(Parser, Debug)]
#[command(name = "database-layering")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate project components
    Generate(GenerateArgs),
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    #[command(subcommand)]
    pub component: GenerateComponent,
}

/// Components that can be generated
#[derive(Subcommand, Debug)]
pub enum GenerateComponent {
    /// Generate a new repository
    Repository {
        /// Repository name (e.g., "post" or "PostRepository")
        name: String,

        /// Entity module the repository wraps (defaults to the name without the suffix)
        #[arg(short, long)]
        entity: Option<String>,

        /// Output directory
        #[arg(short, long, env = "REPOSITORY_PATH")]
        path: Option<PathBuf>,
    },
    /// Generate a new criterion
    Criteria {
        /// Criterion name (e.g., "PublishedOnly")
        name: String,

        /// Entity module the criterion filters (omit for a generic criterion)
        #[arg(short, long)]
        entity: Option<String>,

        /// Output directory
        #[arg(short, long, env = "CRITERIA_PATH")]
        path: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_repository() {
        let cli = Cli::try_parse_from([
            "database-layering",
            "generate",
            "repository",
            "post",
            "--entity",
            "blog_post",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate(GenerateArgs {
                component: GenerateComponent::Repository { name, entity, .. },
            }) => {
                assert_eq!(name, "post");
                assert_eq!(entity.as_deref(), Some("blog_post"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_generate_criteria_verbose() {
        let cli = Cli::try_parse_from([
            "database-layering",
            "-v",
            "generate",
            "criteria",
            "PublishedOnly",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Generate(GenerateArgs {
                component: GenerateComponent::Criteria { .. }
            })
        ));
    }
}
