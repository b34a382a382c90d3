//! Configuration file upgrades: detect keys missing from an older YAML file
//! and add them with their default values.

use super::{Config, DEFAULT_AUTOSAVE_SECS, DEFAULT_DRAFT_KEY, DEFAULT_SUBMIT_ROUTE};
use serde_yaml::Value;
use std::fs;
use std::io;
use std::path::Path;

/// Keys every current configuration file is expected to carry, with the
/// value written when one is missing.
fn expected_keys() -> Vec<(&'static str, Value)> {
    vec![
        (
            "database",
            Value::String(Config::database_file().to_string_lossy().to_string()),
        ),
        ("draft_key", Value::String(DEFAULT_DRAFT_KEY.to_string())),
        (
            "autosave_interval_secs",
            Value::Number(DEFAULT_AUTOSAVE_SECS.into()),
        ),
        ("submit_route", Value::String(DEFAULT_SUBMIT_ROUTE.to_string())),
        ("separator_char", Value::String("-".to_string())),
    ]
}

/// Return the names of the expected keys absent from the YAML text.
pub fn missing_keys(content: &str) -> io::Result<Vec<&'static str>> {
    let yaml: Value = serde_yaml::from_str(content).map_err(io::Error::other)?;
    let Some(map) = yaml.as_mapping() else {
        return Ok(expected_keys().into_iter().map(|(k, _)| k).collect());
    };

    Ok(expected_keys()
        .into_iter()
        .filter(|(k, _)| !map.contains_key(Value::String((*k).to_string())))
        .map(|(k, _)| k)
        .collect())
}

/// Add every missing key to the file at `path`.
///   Returns:
///   Ok(added keys) → file rewritten when the list is not empty
pub fn migrate_config_file(path: &Path) -> io::Result<Vec<&'static str>> {
    let content = fs::read_to_string(path)?;
    let mut yaml: Value = serde_yaml::from_str(&content).map_err(io::Error::other)?;

    let Some(map) = yaml.as_mapping_mut() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Configuration file {:?} is not a YAML mapping", path),
        ));
    };

    let mut added = Vec::new();
    for (key, default) in expected_keys() {
        let k = Value::String(key.to_string());
        if !map.contains_key(&k) {
            map.insert(k, default);
            added.push(key);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&yaml)
            .map_err(|e| io::Error::other(format!("serialize error: {}", e)))?;
        fs::write(path, serialized)?;
    }

    Ok(added)
}
