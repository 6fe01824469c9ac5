//! CLI argument validation functions
//!
//! Custom value parsers for arguments that need more than a type check.

use std::fs;
use std::path::PathBuf;

use crate::config::{MAX_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES};

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Validate an interval argument is a whole number of minutes in range
pub fn validate_interval_minutes(value: &str) -> Result<u32, String> {
    let minutes: u32 = value
        .trim()
        .parse()
        .map_err(|_| format!("Interval must be a whole number of minutes, got: '{}'", value))?;

    if !(MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES).contains(&minutes) {
        return Err(format!(
            "Interval must be between {} and {} minutes",
            MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES
        ));
    }

    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_interval_minutes() {
        assert_eq!(validate_interval_minutes("1"), Ok(1));
        assert_eq!(validate_interval_minutes(" 1440 "), Ok(1440));
        assert!(validate_interval_minutes("0").is_err());
        assert!(validate_interval_minutes("1441").is_err());
        assert!(validate_interval_minutes("-3").is_err());
        assert!(validate_interval_minutes("ten").is_err());
    }

    #[test]
    fn test_validate_config_file_path() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path), Ok(PathBuf::from(path)));

        assert!(validate_config_file_path("/nonexistent/pagewatch.toml").is_err());

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
    }
}
