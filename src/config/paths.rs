use std::fs;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

const APP_DIR: &str = "onefc";

#[derive(Debug, Clone)]
pub struct AppPaths {
    profiles_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> AppResult<Self> {
        let config_root = dirs::config_dir()
            .ok_or_else(|| AppError::Config("unable to resolve config directory".to_string()))?;

        Self::under(config_root.join(APP_DIR))
    }

    pub fn under(config_dir: PathBuf) -> AppResult<Self> {
        let profiles_dir = config_dir.join("profiles");
        fs::create_dir_all(&profiles_dir)?;

        Ok(Self { profiles_dir })
    }

    pub fn settings_file(&self, profile: &str) -> PathBuf {
        self.profiles_dir.join(format!("{profile}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_file_lives_under_profiles() {
        let root = std::env::temp_dir().join(format!("onefc-paths-{}", std::process::id()));
        let paths = AppPaths::under(root.clone()).unwrap();

        assert_eq!(
            paths.settings_file("work"),
            root.join("profiles").join("work.json")
        );
        assert!(root.join("profiles").is_dir());

        let _ = fs::remove_dir_all(root);
    }
}
