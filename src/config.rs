//! Deployment configuration
//!
//! One immutable `DeployConfig` drives every component. Values come from, in
//! order of priority:
//! 1. Environment variables (STEVEDORE_*)
//! 2. A `stevedore.toml` file (explicit `--config` path, or one in the
//!    current directory)
//! 3. Built-in defaults

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DeployError, DeployResult};

/// Immutable deployment configuration shared by all components.
///
/// `env` is a `BTreeMap` so the generated `docker run` argument order is
/// deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Git remote holding the application sources
    pub repo_url: String,
    /// Local working copy directory
    pub repo_path: PathBuf,
    /// Compiler entry file, relative to the working copy
    pub entry_point: String,
    /// Name of the compiled executable
    pub executable_name: String,
    /// Directory receiving the compiled artifact and the Dockerfile
    pub build_dir: PathBuf,
    /// File name of the generated build descriptor
    pub dockerfile_name: String,
    /// Capability flags passed to `deno compile`
    pub compile_flags: Vec<String>,
    /// Compile target triple
    pub target: String,
    /// Docker image tag
    pub image_name: String,
    /// Docker container name
    pub container_name: String,
    /// Port mappings, `HOST:CONTAINER`
    pub ports: Vec<String>,
    /// Environment variables injected into the running container
    pub env: BTreeMap<String, String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            repo_url: "git@github.com:example/app.git".to_string(),
            repo_path: PathBuf::from("/srv/stevedore/app"),
            entry_point: "main.ts".to_string(),
            executable_name: "app".to_string(),
            build_dir: PathBuf::from("/srv/stevedore/app/build"),
            dockerfile_name: "Dockerfile".to_string(),
            compile_flags: vec![
                "--allow-net".to_string(),
                "--allow-env".to_string(),
                "--allow-sys".to_string(),
                "--allow-read".to_string(),
            ],
            target: "x86_64-unknown-linux-gnu".to_string(),
            image_name: "app".to_string(),
            container_name: "app".to_string(),
            ports: vec!["8000:8000".to_string()],
            env: BTreeMap::new(),
        }
    }
}

impl DeployConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DeployResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| DeployError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.with_absolute_build_dir()
    }

    /// Load from an explicit path, a `stevedore.toml` in the current
    /// directory, or defaults. Environment overrides apply in every case.
    ///
    /// An explicit path that cannot be read or parsed is an error; a missing
    /// implicit `stevedore.toml` is not.
    pub fn load_or_default(explicit: Option<&Path>) -> DeployResult<Self> {
        let config = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let implicit = Path::new("stevedore.toml");
                if implicit.exists() {
                    Self::load(implicit)?
                } else {
                    Self::default()
                }
            }
        };
        config.with_env_overrides().with_absolute_build_dir()
    }

    /// Apply environment variable overrides (STEVEDORE_* prefix)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("STEVEDORE_REPO_URL") {
            self.repo_url = url;
        }
        if let Ok(path) = std::env::var("STEVEDORE_REPO_PATH") {
            self.repo_path = PathBuf::from(path);
        }
        if let Ok(dir) = std::env::var("STEVEDORE_BUILD_DIR") {
            self.build_dir = PathBuf::from(dir);
        }
        if let Ok(image) = std::env::var("STEVEDORE_IMAGE") {
            self.image_name = image;
        }
        if let Ok(container) = std::env::var("STEVEDORE_CONTAINER") {
            self.container_name = container;
        }
        self
    }

    /// Resolve a relative `build_dir` against the current directory.
    ///
    /// The compiler runs with the working copy as its cwd, so a relative
    /// `--output` path would land somewhere other than where the artifact
    /// existence check looks.
    fn with_absolute_build_dir(mut self) -> DeployResult<Self> {
        if self.build_dir.is_relative() {
            self.build_dir = std::env::current_dir()?.join(&self.build_dir);
        }
        Ok(self)
    }

    /// Path of the compiled executable inside the build directory
    pub fn artifact_path(&self) -> PathBuf {
        self.build_dir.join(&self.executable_name)
    }

    /// Path of the generated Dockerfile inside the build directory
    pub fn dockerfile_path(&self) -> PathBuf {
        self.build_dir.join(&self.dockerfile_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_matches_expected_shape() {
        let config = DeployConfig::default();
        assert_eq!(config.entry_point, "main.ts");
        assert_eq!(config.ports, vec!["8000:8000".to_string()]);
        assert_eq!(config.target, "x86_64-unknown-linux-gnu");
        assert!(config.compile_flags.contains(&"--allow-net".to_string()));
    }

    #[test]
    fn derived_paths_join_build_dir() {
        let config = DeployConfig {
            build_dir: PathBuf::from("/tmp/build"),
            executable_name: "svc".to_string(),
            dockerfile_name: "Dockerfile".to_string(),
            ..DeployConfig::default()
        };
        assert_eq!(config.artifact_path(), PathBuf::from("/tmp/build/svc"));
        assert_eq!(
            config.dockerfile_path(),
            PathBuf::from("/tmp/build/Dockerfile")
        );
    }

    #[test]
    fn load_parses_partial_toml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
repo_url = "git@github.com:acme/tickets.git"
image_name = "tickets"
container_name = "tickets"

[env]
DB_HOST = "127.0.0.1"
DB_PORT = "5432"
"#
        )
        .unwrap();

        let config = DeployConfig::load(file.path()).unwrap();
        assert_eq!(config.repo_url, "git@github.com:acme/tickets.git");
        assert_eq!(config.image_name, "tickets");
        // untouched fields fall back to defaults
        assert_eq!(config.entry_point, "main.ts");
        assert_eq!(config.env.get("DB_HOST").map(String::as_str), Some("127.0.0.1"));
    }

    #[test]
    fn load_absolutizes_relative_build_dir() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "build_dir = \"build-output\"").unwrap();

        let config = DeployConfig::load(file.path()).unwrap();
        assert!(config.build_dir.is_absolute());
        assert_eq!(
            config.build_dir,
            std::env::current_dir().unwrap().join("build-output")
        );
        // artifact check and compiler --output now agree on one location
        assert!(config.artifact_path().is_absolute());
    }

    #[test]
    fn load_keeps_absolute_build_dir_untouched() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "build_dir = \"/srv/elsewhere/build\"").unwrap();

        let config = DeployConfig::load(file.path()).unwrap();
        assert_eq!(config.build_dir, PathBuf::from("/srv/elsewhere/build"));
    }

    #[test]
    fn load_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ports = \"not-a-list\"").unwrap();

        let err = DeployConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, DeployError::InvalidConfig { .. }));
    }

    #[test]
    fn load_or_default_errors_on_missing_explicit_path() {
        let result = DeployConfig::load_or_default(Some(Path::new("/nonexistent/stevedore.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn env_iteration_order_is_stable() {
        let mut env = BTreeMap::new();
        env.insert("ZZ".to_string(), "1".to_string());
        env.insert("AA".to_string(), "2".to_string());
        let config = DeployConfig {
            env,
            ..DeployConfig::default()
        };
        let keys: Vec<_> = config.env.keys().cloned().collect();
        assert_eq!(keys, vec!["AA".to_string(), "ZZ".to_string()]);
    }
}
