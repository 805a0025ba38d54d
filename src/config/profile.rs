use crate::error::{AppError, AppResult};

const DEFAULT_PROFILE: &str = "default";

/// Profile names become file names under the profiles directory.
pub fn resolve_profile(requested: &str) -> AppResult<String> {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_PROFILE.to_string());
    }

    let unsafe_name = trimmed.starts_with('.')
        || trimmed
            .chars()
            .any(|ch| matches!(ch, '/' | '\\' | ':') || ch.is_control());
    if unsafe_name {
        return Err(AppError::InvalidInput(format!(
            "profile name `{trimmed}` must not contain path separators or start with `.`"
        )));
    }

    Ok(trimmed.to_string())
}
