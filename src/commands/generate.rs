//! Generate command - Code generation for repositories and criteria.

use crate::cli::args::{GenerateArgs, GenerateComponent};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::LocalFilesystem;
use crate::utils::{CriteriaCreator, RepositoryCreator};

/// Execute the generate command
pub async fn execute(args: GenerateArgs, mut config: Config) -> AppResult<()> {
    match args.component {
        GenerateComponent::Repository { name, entity, path } => {
            if let Some(path) = path {
                config.repository_path = path;
            }

            tracing::info!("Generating repository: {}", name);
            let created =
                RepositoryCreator::new(LocalFilesystem, config).create(&name, entity.as_deref())?;
            println!("Created: {}", created.display());
            println!("Don't forget to add the module to mod.rs!");
        }
        GenerateComponent::Criteria { name, entity, path } => {
            if let Some(path) = path {
                config.criteria_path = path;
            }

            tracing::info!("Generating criterion: {}", name);
            let created =
                CriteriaCreator::new(LocalFilesystem, config).create(&name, entity.as_deref())?;
            println!("Created: {}", created.display());
            println!("Don't forget to add the module to mod.rs!");
        }
    }

    Ok(())
}
