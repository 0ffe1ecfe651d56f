//! Configuration validation.

use std::collections::HashSet;

use super::InspectConfig;
use crate::error::{InspectError, Result};

/// Validate the configuration.
pub fn validate(config: &InspectConfig) -> Result<()> {
    check_names("schemas", &config.schemas)?;
    check_names("tables", &config.tables)?;
    check_names("exclude_schemas", &config.exclude_schemas)?;

    if let Some(schema) = config
        .schemas
        .iter()
        .find(|s| config.exclude_schemas.contains(*s))
    {
        return Err(InspectError::Config(format!(
            "schema '{}' is both listed in schemas and exclude_schemas",
            schema
        )));
    }

    if let Some(0) = config.query_timeout_secs {
        return Err(InspectError::Config(
            "query_timeout_secs must be at least 1".into(),
        ));
    }

    Ok(())
}

fn check_names(field: &str, names: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(InspectError::Config(format!(
                "{} must not contain empty names",
                field
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(InspectError::Config(format!(
                "{} contains '{}' more than once",
                field, name
            )));
        }
    }
    Ok(())
}
