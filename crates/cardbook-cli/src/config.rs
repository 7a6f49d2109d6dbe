use std::path::{Path, PathBuf};

use cardbook_core::DiffMode;
use serde::{Deserialize, Serialize};

/// Identifier of a chat user, as issued by the messaging platform.
pub type UserId = i64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardbookConfig {
    pub ledger: LedgerSection,
    #[serde(default)]
    pub access: AccessSection,
    #[serde(default)]
    pub reconcile: ReconcileSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSection {
    pub path: String,
}

/// Who may talk to the chat dispatcher. An empty list allows everyone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessSection {
    #[serde(default)]
    pub authorized_users: Vec<UserId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileSection {
    #[serde(default)]
    pub diff_mode: DiffMode,
}

impl AccessSection {
    pub fn is_authorized(&self, user: UserId) -> bool {
        self.authorized_users.is_empty() || self.authorized_users.contains(&user)
    }
}

impl CardbookConfig {
    pub fn new(ledger_path: PathBuf, authorized_users: Vec<UserId>, diff_mode: DiffMode) -> Self {
        Self {
            ledger: LedgerSection {
                path: ledger_path.to_string_lossy().to_string(),
            },
            access: AccessSection { authorized_users },
            reconcile: ReconcileSection { diff_mode },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_ledger_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("cards.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<CardbookConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &CardbookConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("cardbook"));
        }
    }
    Ok(home_dir()?.join(".config").join("cardbook"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("cardbook"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("cardbook"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
