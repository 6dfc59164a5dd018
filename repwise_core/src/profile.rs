//! User profile storage.
//!
//! The profile lives in a small JSON file. Absence is a legitimate
//! state (scoring and suggestions run before onboarding completes), so
//! a missing or malformed file yields `None` rather than an error.

use crate::{Result, UserProfile};
use std::path::Path;

/// Load the user profile from a JSON file
///
/// Returns None if the file doesn't exist or cannot be parsed; callers
/// treat both as "not configured yet".
pub fn load_profile(path: &Path) -> Result<Option<UserProfile>> {
    if !path.exists() {
        tracing::debug!("No profile file found at {:?}", path);
        return Ok(None);
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(
                "Failed to read profile at {:?}: {}. Treating as unconfigured.",
                path,
                e
            );
            return Ok(None);
        }
    };

    match serde_json::from_str::<UserProfile>(&contents) {
        Ok(profile) => {
            tracing::debug!("Loaded profile from {:?}", path);
            Ok(Some(profile))
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse profile at {:?}: {}. Treating as unconfigured.",
                path,
                e
            );
            Ok(None)
        }
    }
}

/// Save the user profile as pretty-printed JSON
pub fn save_profile(profile: &UserProfile, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, contents)?;
    tracing::info!("Saved profile to {:?}", path);
    Ok(())
}
