//! Project and user configuration.
//!
//! Both files are optional TOML:
//!
//! - project: `<root>/.tickets/config.toml`, with a `[storage]` table.
//! - user: `<config_dir>/tickets/config.toml`, with `output` and `data_dir`.
//!
//! Missing files fall back to defaults. A file that exists but cannot be
//! parsed is an error naming its path.

use crate::repository::json_file::DEFAULT_FILE_NAME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Data directory used when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TICKETS_DATA_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            file_name: default_file_name(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Everything the CLI needs from configuration, after precedence is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub user: UserConfig,
    pub store_path: PathBuf,
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".tickets/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_user_config_from(&config_dir.join("tickets/config.toml"))
}

/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_user_config_from(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load both config files and resolve the store path.
///
/// `flag_data_dir` is the `--data-dir` value; `env_data_dir` is the value of
/// [`DATA_DIR_ENV`].
///
/// # Errors
///
/// Fails if either config file exists but cannot be parsed.
pub fn resolve_config(
    project_root: &Path,
    flag_data_dir: Option<&Path>,
    env_data_dir: Option<&Path>,
) -> Result<EffectiveConfig> {
    let user = load_user_config()?;
    resolve_config_with_user(project_root, flag_data_dir, env_data_dir, user)
}

/// Same as [`resolve_config`], with an already-loaded user config.
///
/// # Errors
///
/// Fails if the project config exists but cannot be parsed.
pub fn resolve_config_with_user(
    project_root: &Path,
    flag_data_dir: Option<&Path>,
    env_data_dir: Option<&Path>,
    user: UserConfig,
) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;

    let data_dir = resolve_data_dir(flag_data_dir, env_data_dir, &project, &user, project_root);
    let from_file = flag_data_dir.is_none()
        && env_data_dir.is_none()
        && (project.storage.data_dir.is_some() || user.data_dir.is_some());
    if from_file && !data_dir.exists() {
        warn!(
            path = %data_dir.display(),
            "configured data directory does not exist; it will be created"
        );
    }
    let store_path = data_dir.join(&project.storage.file_name);

    Ok(EffectiveConfig {
        user,
        store_path,
    })
}

/// Pick the data directory: flag, env, project config, user config, then
/// `./data`. Relative paths are joined onto `cwd`.
#[must_use]
pub fn resolve_data_dir(
    flag: Option<&Path>,
    env: Option<&Path>,
    project: &ProjectConfig,
    user: &UserConfig,
    cwd: &Path,
) -> PathBuf {
    let chosen = flag
        .or(env)
        .or(project.storage.data_dir.as_deref())
        .or(user.data_dir.as_deref())
        .unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR));

    if chosen.is_absolute() {
        chosen.to_path_buf()
    } else {
        cwd.join(chosen)
    }
}

/// Map an output mode name onto `pretty`, `text` or `json`.
///
/// Accepts the legacy aliases `human` and `table`. Unknown names yield `None`.
#[must_use]
pub fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "table" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_project_config(root: &Path, content: &str) {
        let dir = root.join(".tickets");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), content).unwrap();
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = TempDir::new().unwrap();
        let cfg = load_project_config(root.path()).unwrap();
        assert_eq!(cfg.storage.data_dir, None);
        assert_eq!(cfg.storage.file_name, "tickets.json");
    }

    #[test]
    fn project_config_reads_storage_table() {
        let root = TempDir::new().unwrap();
        write_project_config(
            root.path(),
            r#"
[storage]
data_dir = "var/tickets"
file_name = "board.json"
"#,
        );

        let cfg = load_project_config(root.path()).unwrap();
        assert_eq!(cfg.storage.data_dir, Some(PathBuf::from("var/tickets")));
        assert_eq!(cfg.storage.file_name, "board.json");
    }

    #[test]
    fn partial_storage_table_keeps_default_file_name() {
        let root = TempDir::new().unwrap();
        write_project_config(root.path(), "[storage]\ndata_dir = \"elsewhere\"\n");

        let cfg = load_project_config(root.path()).unwrap();
        assert_eq!(cfg.storage.file_name, "tickets.json");
    }

    #[test]
    fn unparseable_project_config_names_the_file() {
        let root = TempDir::new().unwrap();
        write_project_config(root.path(), "[storage\n");

        let err = load_project_config(root.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Failed to parse"), "{message}");
        assert!(message.contains("config.toml"), "{message}");
    }

    #[test]
    fn user_config_parses_output_and_data_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "output = \"json\"\ndata_dir = \"/srv/tickets\"\n").unwrap();

        let cfg = load_user_config_from(&path).unwrap();
        assert_eq!(cfg.output.as_deref(), Some("json"));
        assert_eq!(cfg.data_dir, Some(PathBuf::from("/srv/tickets")));
    }

    #[test]
    fn missing_user_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = load_user_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, UserConfig::default());
    }

    #[test]
    fn data_dir_defaults_to_cwd_data() {
        let cwd = Path::new("/work");
        let dir = resolve_data_dir(
            None,
            None,
            &ProjectConfig::default(),
            &UserConfig::default(),
            cwd,
        );
        assert_eq!(dir, PathBuf::from("/work/data"));
    }

    #[test]
    fn data_dir_precedence() {
        let cwd = Path::new("/work");
        let project = ProjectConfig {
            storage: StorageConfig {
                data_dir: Some(PathBuf::from("project")),
                ..StorageConfig::default()
            },
        };
        let user = UserConfig {
            output: None,
            data_dir: Some(PathBuf::from("/home/me/tickets")),
        };

        let flag = resolve_data_dir(
            Some(Path::new("/flag")),
            Some(Path::new("/env")),
            &project,
            &user,
            cwd,
        );
        assert_eq!(flag, PathBuf::from("/flag"));

        let env = resolve_data_dir(None, Some(Path::new("/env")), &project, &user, cwd);
        assert_eq!(env, PathBuf::from("/env"));

        let from_project = resolve_data_dir(None, None, &project, &user, cwd);
        assert_eq!(from_project, PathBuf::from("/work/project"));

        let from_user = resolve_data_dir(None, None, &ProjectConfig::default(), &user, cwd);
        assert_eq!(from_user, PathBuf::from("/home/me/tickets"));
    }

    #[test]
    fn resolve_config_joins_file_name() {
        let root = TempDir::new().unwrap();
        write_project_config(root.path(), "[storage]\nfile_name = \"t.json\"\n");

        let user = load_user_config_from(&root.path().join("user.toml")).unwrap();

        let cfg =
            resolve_config_with_user(root.path(), Some(Path::new("store")), None, user).unwrap();
        assert_eq!(cfg.store_path, root.path().join("store").join("t.json"));
    }

    #[test]
    fn resolve_config_falls_back_to_user_data_dir() {
        let root = TempDir::new().unwrap();
        let user_file = root.path().join("user.toml");
        std::fs::write(&user_file, "output = \"text\"\ndata_dir = \"shared\"\n").unwrap();
        let user = load_user_config_from(&user_file).unwrap();

        let cfg = resolve_config_with_user(root.path(), None, None, user).unwrap();
        assert_eq!(cfg.store_path, root.path().join("shared").join("tickets.json"));
        assert_eq!(cfg.user.output.as_deref(), Some("text"));
    }

    #[test]
    fn output_aliases_are_normalized() {
        assert_eq!(normalize_output_mode("human"), Some("pretty"));
        assert_eq!(normalize_output_mode("table"), Some("text"));
        assert_eq!(normalize_output_mode(" JSON "), Some("json"));
        assert_eq!(normalize_output_mode("fancy"), None);
    }
}
