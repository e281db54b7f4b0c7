//! Repository and criterion file creators.

use std::path::{Path, PathBuf};

use super::templates::{render_criterion, render_repository, to_pascal_case, to_snake_case};
use crate::config::{Config, REPOSITORY_SUFFIX};
use crate::errors::{AppError, AppResult};
use crate::infra::Filesystem;

/// Writes new repository files under `Config::repository_path`
pub struct RepositoryCreator<F: Filesystem> {
    fs: F,
    config: Config,
}

impl<F: Filesystem> RepositoryCreator<F> {
    pub fn new(fs: F, config: Config) -> Self {
        Self { fs, config }
    }

    /// Generate `<name>Repository` for `entity` (derived from the name when
    /// omitted) and return the written path.
    pub fn create(&self, name: &str, entity: Option<&str>) -> AppResult<PathBuf> {
        let repository = repository_name(name)?;
        let entity = match entity {
            Some(entity) => entity_name(entity)?,
            None => entity_from_repository(&repository)?,
        };

        let path = self
            .config
            .repository_path
            .join(format!("{}.rs", to_snake_case(&repository)));
        let contents = render_repository(&repository, &entity, &self.config.entity_module);

        write_new(&self.fs, &path, &contents)?;
        Ok(path)
    }
}

/// Writes new criterion files under `Config::criteria_path`
pub struct CriteriaCreator<F: Filesystem> {
    fs: F,
    config: Config,
}

impl<F: Filesystem> CriteriaCreator<F> {
    pub fn new(fs: F, config: Config) -> Self {
        Self { fs, config }
    }

    /// Generate a criterion and return the written path.
    ///
    /// With an entity the file goes to `<criteria_path>/<entity>/`,
    /// otherwise straight into `<criteria_path>/` as a generic criterion.
    pub fn create(&self, name: &str, entity: Option<&str>) -> AppResult<PathBuf> {
        validate_name(name)?;
        let criterion = to_pascal_case(&to_snake_case(name));
        let entity = entity.map(entity_name).transpose()?;

        let dir = match &entity {
            Some(entity) => self.config.criteria_path.join(entity),
            None => self.config.criteria_path.clone(),
        };
        let path = dir.join(format!("{}.rs", to_snake_case(&criterion)));
        let contents =
            render_criterion(&criterion, entity.as_deref(), &self.config.entity_module);

        write_new(&self.fs, &path, &contents)?;
        Ok(path)
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if starts_with_letter && rest_valid {
        Ok(())
    } else {
        Err(AppError::validation(format!("Invalid name: '{}'", name)))
    }
}

fn repository_name(name: &str) -> AppResult<String> {
    validate_name(name)?;
    let pascal = to_pascal_case(&to_snake_case(name));
    if pascal.ends_with(REPOSITORY_SUFFIX) {
        Ok(pascal)
    } else {
        Ok(format!("{}{}", pascal, REPOSITORY_SUFFIX))
    }
}

fn entity_name(entity: &str) -> AppResult<String> {
    validate_name(entity)?;
    Ok(to_snake_case(entity))
}

fn entity_from_repository(repository: &str) -> AppResult<String> {
    let base = repository
        .strip_suffix(REPOSITORY_SUFFIX)
        .unwrap_or(repository);
    if base.is_empty() {
        return Err(AppError::validation(format!(
            "Cannot derive an entity from '{}', pass one explicitly",
            repository
        )));
    }
    Ok(to_snake_case(base))
}

/// Write `contents` to a file that must not exist yet
fn write_new<F: Filesystem>(fs: &F, path: &Path, contents: &str) -> AppResult<()> {
    if fs.exists(path) {
        return Err(AppError::conflict(path.display().to_string()));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !fs.exists(parent) {
            fs.create_dir_all(parent)?;
        }
    }

    fs.write(path, contents)?;
    tracing::info!(path = %path.display(), "Generated file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockFilesystem;

    fn config() -> Config {
        Config {
            repository_path: PathBuf::from("src/repositories"),
            criteria_path: PathBuf::from("src/criteria"),
            entity_module: "crate::entities".to_string(),
        }
    }

    #[test]
    fn test_repository_written_with_suffix_and_derived_entity() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all()
            .withf(|path: &Path| path == Path::new("src/repositories"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write()
            .withf(|path: &Path, contents: &str| {
                path == Path::new("src/repositories/post_repository.rs")
                    && contents.contains("pub struct PostRepository {")
                    && contents.contains("use crate::entities::post::")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let created = RepositoryCreator::new(fs, config()).create("post", None).unwrap();
        assert_eq!(created, PathBuf::from("src/repositories/post_repository.rs"));
    }

    #[test]
    fn test_repository_with_explicit_entity() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write()
            .withf(|path: &Path, contents: &str| {
                path == Path::new("src/repositories/article_repository.rs")
                    && contents.contains("use crate::entities::blog_post::")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        RepositoryCreator::new(fs, config())
            .create("ArticleRepository", Some("BlogPost"))
            .unwrap();
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir_all().never();
        fs.expect_write().never();

        let err = RepositoryCreator::new(fs, config())
            .create("PostRepository", None)
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_existing_directory_is_reused() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(|path: &Path| path == Path::new("src/repositories"));
        fs.expect_create_dir_all().never();
        fs.expect_write().times(1).returning(|_, _| Ok(()));

        RepositoryCreator::new(fs, config()).create("post", None).unwrap();
    }

    #[test]
    fn test_bare_suffix_needs_an_entity() {
        let mut fs = MockFilesystem::new();
        fs.expect_write().never();

        let err = RepositoryCreator::new(fs, config())
            .create("Repository", None)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let creator = RepositoryCreator::new(MockFilesystem::new(), config());
        assert!(matches!(creator.create("", None), Err(AppError::Validation(_))));
        assert!(matches!(creator.create("1post", None), Err(AppError::Validation(_))));
        assert!(matches!(creator.create("../post", None), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_criterion_goes_into_entity_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all()
            .withf(|path: &Path| path == Path::new("src/criteria/post"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write()
            .withf(|path: &Path, contents: &str| {
                path == Path::new("src/criteria/post/published_only.rs")
                    && contents.contains("impl Criterion<Entity> for PublishedOnly {")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let created = CriteriaCreator::new(fs, config())
            .create("PublishedOnly", Some("Post"))
            .unwrap();
        assert_eq!(created, PathBuf::from("src/criteria/post/published_only.rs"));
    }

    #[test]
    fn test_generic_criterion_without_entity() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write()
            .withf(|path: &Path, contents: &str| {
                path == Path::new("src/criteria/newest_first.rs")
                    && contents.contains("impl<E: EntityTrait> Criterion<E> for NewestFirst {")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        CriteriaCreator::new(fs, config())
            .create("newest_first", None)
            .unwrap();
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write().returning(|_, _| {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            ))
        });

        let err = CriteriaCreator::new(fs, config())
            .create("Published", None)
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
