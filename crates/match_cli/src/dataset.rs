use std::fs;
use std::path::Path;

use match_core::{Announcement, InMemoryStore, MatchingCriteria, Route};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Routes and announcements loaded from a JSON file.
///
/// ```json
/// { "routes": [ ... ], "announcements": [ ... ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub routes: Vec<Route>,
    pub announcements: Vec<Announcement>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        read_json(path)
    }

    pub fn into_store(self) -> InMemoryStore {
        InMemoryStore::with_data(self.routes, self.announcements)
    }
}

/// Default criteria, overridden field by field by the JSON file when given.
pub fn load_criteria(path: Option<&Path>) -> Result<MatchingCriteria, CliError> {
    let criteria = match path {
        Some(path) => read_json(path)?,
        None => MatchingCriteria::default(),
    };
    criteria.validate()?;
    Ok(criteria)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
