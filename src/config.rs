use crate::model::PersistedState;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "tune-menu";
const STATE_FILE: &str = "state.json";
const DIR_OVERRIDE_VAR: &str = "TUNE_MENU_CONFIG_DIR";

/// Where the session state lives on disk. Resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    root: PathBuf,
}

impl StatePaths {
    /// `TUNE_MENU_CONFIG_DIR` wins; otherwise `~/.config/tune-menu`.
    pub fn resolve() -> Result<Self> {
        if let Ok(override_dir) = env::var(DIR_OVERRIDE_VAR) {
            return Ok(Self::at(override_dir));
        }

        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .context("neither HOME nor USERPROFILE is set")?;
        Ok(Self::at(PathBuf::from(home).join(".config").join(APP_DIR)))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state_file(&self) -> PathBuf {
        self.root.join(STATE_FILE)
    }

    pub fn ensure_root(&self) -> Result<&Path> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;
        Ok(&self.root)
    }

    /// A missing file is a fresh session, not an error.
    pub fn load(&self) -> Result<PersistedState> {
        let path = self.state_file();
        if !path.exists() {
            return Ok(PersistedState::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read state file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse state file {}", path.display()))
    }

    pub fn save(&self, state: &PersistedState) -> Result<()> {
        self.ensure_root()?;
        let path = self.state_file();
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))
    }
}
