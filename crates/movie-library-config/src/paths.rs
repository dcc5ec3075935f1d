use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base path override for running outside a home directory (containers,
/// tests). Unset means platform-specific config paths.
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("REELVAULT_BASE_PATH").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reelvault");

        Ok(Self {
            config_dir: base_dir.clone(),
            data_dir: base_dir.join("data"),
        })
    }

    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn database_file(&self) -> PathBuf {
        self.data_dir.join("movies.db")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_hang_off_base() {
        let manager = PathManager::from_base(PathBuf::from("/tmp/reelvault-test"));
        assert_eq!(
            manager.config_file(),
            PathBuf::from("/tmp/reelvault-test/config.toml")
        );
        assert_eq!(
            manager.database_file(),
            PathBuf::from("/tmp/reelvault-test/data/movies.db")
        );
    }
}
