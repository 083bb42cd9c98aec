//! Reading and writing draw scripts as YAML.

use std::path::Path;

use super::format::DrawScript;
use crate::error::GraphicsError;

/// Load a draw script from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_script(path: &Path) -> Result<DrawScript, GraphicsError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        GraphicsError::Script(format!("Failed to read script {}: {e}", path.display()))
    })?;
    serde_yaml::from_str(&content)
        .map_err(|e| GraphicsError::Script(format!("Failed to parse script {}: {e}", path.display())))
}

/// Write a draw script as YAML, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the script cannot be serialized or written.
pub fn save_script(path: &Path, script: &DrawScript) -> Result<(), GraphicsError> {
    let yaml = serde_yaml::to_string(script)
        .map_err(|e| GraphicsError::Script(format!("Failed to serialize script: {e}")))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, yaml)?;
    log::debug!("wrote {} commands to {}", script.commands.len(), path.display());
    Ok(())
}
