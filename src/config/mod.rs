pub mod paths;
pub mod profile;
pub mod settings;

use std::path::PathBuf;

pub use paths::AppPaths;
pub use profile::resolve_profile;
pub use settings::Settings;

use crate::error::{AppError, AppResult};

/// Settings for `profile`; a profile without a file runs on defaults.
pub fn load_settings(paths: &AppPaths, profile: &str) -> AppResult<Settings> {
    let path = paths.settings_file(profile);
    tracing::debug!(profile, path = %path.display(), exists = path.exists(), "loading settings");
    settings::load(path)
}

/// Writes every effective default to the profile file and returns what was
/// written. An existing file is only replaced with `force`.
pub fn init_settings(
    paths: &AppPaths,
    profile: &str,
    force: bool,
) -> AppResult<(PathBuf, Settings)> {
    let path = paths.settings_file(profile);
    if path.exists() && !force {
        return Err(AppError::InvalidInput(format!(
            "{} already exists; pass --force to overwrite",
            path.display()
        )));
    }

    let defaults = Settings::default().effective();
    settings::save(path.clone(), &defaults)?;
    tracing::info!(profile, path = %path.display(), "wrote default settings");
    Ok((path, defaults))
}
