//! Configuration type definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::traits::InspectRealmOptions;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectConfig {
    /// Schemas to inspect. Empty means every accessible schema.
    #[serde(default)]
    pub schemas: Vec<String>,

    /// Tables to inspect in each schema. Empty means every table.
    #[serde(default)]
    pub tables: Vec<String>,

    /// Schemas skipped when no explicit schema list is given.
    #[serde(default = "default_exclude_schemas")]
    pub exclude_schemas: Vec<String>,

    /// Deadline for each dictionary query, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_timeout_secs: Option<u64>,
}

fn default_exclude_schemas() -> Vec<String> {
    vec!["SYS".to_string()]
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            schemas: Vec::new(),
            tables: Vec::new(),
            exclude_schemas: default_exclude_schemas(),
            query_timeout_secs: None,
        }
    }
}

impl InspectConfig {
    /// Per-query deadline, if configured.
    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_secs.map(Duration::from_secs)
    }

    /// Realm inspection options for the configured filters.
    pub fn realm_options(&self) -> InspectRealmOptions {
        InspectRealmOptions {
            schemas: self.schemas.clone(),
            tables: self.tables.clone(),
        }
    }
}
