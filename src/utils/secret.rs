use std::env::VarError;
use std::fs;

use tracing::{debug, error};

/// Reads setting `name`, preferring a file named by `<name>_FILE`.
///
/// This lets deployments mount credentials as files (e.g. Docker secrets)
/// instead of plain environment variables. File contents are trimmed. An
/// unreadable file is logged and reported as [`VarError::NotPresent`], so the
/// setting shows up as missing during validation. A `<name>_FILE` that is not
/// valid unicode is reported as [`VarError::NotUnicode`] instead of falling back
/// to the plain variable.
pub fn read_setting<F>(name: &str, get_var: F) -> Result<String, VarError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let file_var = format!("{name}_FILE");
    match get_var(&file_var) {
        Ok(secret_file_path) => match fs::read_to_string(&secret_file_path) {
            Ok(content) => {
                debug!(%name, %secret_file_path, "Read setting from file");
                Ok(content.trim().to_string())
            }
            Err(e) => {
                error!(%name, %secret_file_path, ?e, "Error reading secret file");
                Err(VarError::NotPresent)
            }
        },
        Err(VarError::NotPresent) => get_var(name),
        Err(e @ VarError::NotUnicode(_)) => {
            error!(%name, %file_var, "Secret file path is not valid unicode");
            Err(e)
        }
    }
}
