//! standup configuration.
//!
//! Loaded from `~/.standup/config.toml` unless `--config` points elsewhere.
//! Read once at startup; everything downstream borrows from it.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::classify::Rules;
use crate::glyphs::{EmojiTable, GlyphError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHome,

    #[error(
        "no config file found at {}\n\
         Create one with at minimum:\n\n\
         status-repos = [\"your-org/\"]\n\
         status-branches = [\"main\"]",
        .0.display()
    )]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config at {}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("invalid [glyphs] table: {0}")]
    Glyphs(#[from] GlyphError),
}

/// standup configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Repository name substrings to report on (e.g. `"acme/"`).
    #[serde(default)]
    pub status_repos: Vec<String>,

    /// Branches whose direct single-commit pushes count as ships.
    #[serde(default)]
    pub status_branches: Vec<String>,

    /// Prefixes stripped from repository names for display.
    #[serde(default)]
    pub status_repo_prefixes: Vec<String>,

    /// Whose activity to report. Defaults to the login `gh` is authenticated as.
    pub username: Option<String>,

    /// `GH_CONFIG_DIR` to run `gh` with.
    pub gh_config_dir: Option<PathBuf>,

    /// Glyph overrides, keyed by action or commit type.
    #[serde(default)]
    pub glyphs: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Load config from `path`, or from `~/.standup/config.toml` when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::path().ok_or(ConfigError::NoHome)?,
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path));
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        Self::parse(&contents, &path)
    }

    /// Parse and validate config contents. `path` is only used in errors.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let invalid = |message: &str| ConfigError::Invalid {
            path: path.to_path_buf(),
            message: message.to_string(),
        };
        if config.status_repos.iter().all(|r| r.is_empty()) {
            return Err(invalid("status-repos must list at least one repository pattern"));
        }
        if config.status_branches.iter().all(|b| b.is_empty()) {
            return Err(invalid("status-branches must list at least one branch"));
        }
        if config.username.as_deref() == Some("") {
            return Err(invalid("username is empty; remove it to use the gh login"));
        }
        config.emoji_table()?;

        Ok(config)
    }

    /// The config file path: `~/.standup/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".standup").join("config.toml"))
    }

    /// Classification rules derived from the allow-lists.
    pub fn rules(&self) -> Rules {
        Rules::new(
            self.status_repos.iter().filter(|r| !r.is_empty()).cloned().collect(),
            self.status_branches.clone(),
            self.status_repo_prefixes.clone(),
        )
    }

    /// The default emoji table with this config's overrides applied.
    pub fn emoji_table(&self) -> Result<EmojiTable, ConfigError> {
        Ok(EmojiTable::with_overrides(&self.glyphs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn loads_full_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
status-repos = ["acme/"]
status-branches = ["master", "main"]
status-repo-prefixes = ["acme-"]
username = "octocat"
gh-config-dir = "/tmp/gh"

[glyphs]
ship = [":rocket:"]
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.status_repos, ["acme/"]);
        assert_eq!(config.status_branches, ["master", "main"]);
        assert_eq!(config.status_repo_prefixes, ["acme-"]);
        assert_eq!(config.username.as_deref(), Some("octocat"));
        assert_eq!(config.gh_config_dir, Some(PathBuf::from("/tmp/gh")));
        assert_eq!(config.glyphs["ship"], [":rocket:"]);
    }

    #[test]
    fn missing_file_explains_how_to_create_one() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("status-branches"));
    }

    #[test]
    fn empty_allow_lists_are_fatal() {
        let path = Path::new("config.toml");

        let err = Config::parse("status-branches = [\"main\"]", path).unwrap_err();
        assert!(err.to_string().contains("status-repos"));

        let err = Config::parse("status-repos = [\"acme/\"]\nstatus-branches = []", path)
            .unwrap_err();
        assert!(err.to_string().contains("status-branches"));
    }

    #[test]
    fn rejects_unknown_keys_and_bad_glyphs() {
        let path = Path::new("config.toml");
        let base = "status-repos = [\"acme/\"]\nstatus-branches = [\"main\"]\n";

        let err = Config::parse(&format!("{base}status-repo = [\"x\"]"), path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        let err = Config::parse(&format!("{base}[glyphs]\nship = []"), path).unwrap_err();
        assert!(matches!(err, ConfigError::Glyphs(GlyphError::Empty(_))));
    }
}
