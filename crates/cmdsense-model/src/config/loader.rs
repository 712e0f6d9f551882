use super::schema::StoreConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "cmdsense.yaml";
/// Per-user directory under the home directory.
pub const USER_CONFIG_DIR: &str = ".cmdsense";
pub const USER_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Config files searched by [`ConfigLoader::load_default`], highest
    /// priority first.
    pub fn search_paths(home: Option<&Path>) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".").join(LOCAL_CONFIG_FILE)];
        if let Some(home) = home {
            paths.push(home.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE));
        }
        paths
    }

    /// Load the first existing file from [`ConfigLoader::search_paths`], or
    /// the default configuration when there is none.
    pub async fn load_default() -> Result<StoreConfig, ConfigError> {
        let home = dirs::home_dir();
        for path in Self::search_paths(home.as_deref()) {
            if path.exists() {
                return Self::load_from(&path).await;
            }
        }
        Ok(StoreConfig::default())
    }

    pub async fn load_from(path: &Path) -> Result<StoreConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        // An empty file is a valid config with every field defaulted
        if content.trim().is_empty() {
            return Ok(StoreConfig::default());
        }
        let config: StoreConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_paths_order() {
        let paths = ConfigLoader::search_paths(Some(Path::new("/home/dev")));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("./cmdsense.yaml"),
                PathBuf::from("/home/dev/.cmdsense/config.yaml"),
            ]
        );
    }

    #[test]
    fn test_search_paths_without_home() {
        assert_eq!(
            ConfigLoader::search_paths(None),
            vec![PathBuf::from("./cmdsense.yaml")]
        );
    }
}
