//! Named filter presets persisted as a JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use modq_core::FilterState;
use modq_logging::{modq_debug, modq_warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::persist::{write_atomic, PersistError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPreset {
    pub id: String,
    pub name: String,
    pub filter: FilterState,
    #[serde(default)]
    pub created_at: String,
}

pub struct PresetStore {
    path: PathBuf,
    presets: Vec<FilterPreset>,
}

impl PresetStore {
    /// Loads presets from `path`. A missing file is an empty store; an
    /// unreadable or corrupt one is logged and treated as empty. Entries that
    /// do not decode are skipped one by one, the rest are kept.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let presets = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Vec<Value>>(&bytes) {
                Ok(entries) => decode_entries(&path, entries),
                Err(err) => {
                    modq_warn!("Ignoring corrupt preset file {}: {}", path.display(), err);
                    Vec::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                modq_warn!("Cannot read preset file {}: {}", path.display(), err);
                Vec::new()
            }
        };
        modq_debug!("Loaded {} presets from {}", presets.len(), path.display());
        Self { path, presets }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> &[FilterPreset] {
        &self.presets
    }

    pub fn get(&self, id: &str) -> Option<&FilterPreset> {
        self.presets.iter().find(|preset| preset.id == id)
    }

    /// Looks a preset up by id first, then by exact name.
    pub fn find(&self, id_or_name: &str) -> Option<&FilterPreset> {
        self.get(id_or_name)
            .or_else(|| self.presets.iter().find(|preset| preset.name == id_or_name))
    }

    /// Stores `filter` under `name`. The page is not part of a preset.
    pub fn save(
        &mut self,
        name: impl Into<String>,
        filter: &FilterState,
    ) -> Result<FilterPreset, PersistError> {
        let now = Utc::now();
        let mut stamp = now.timestamp_millis();
        while self.get(&stamp.to_string()).is_some() {
            stamp += 1;
        }
        let preset = FilterPreset {
            id: stamp.to_string(),
            name: name.into(),
            filter: FilterState {
                page: 1,
                ..filter.clone().normalized()
            },
            created_at: now.to_rfc3339(),
        };
        self.presets.push(preset.clone());
        if let Err(err) = self.flush() {
            self.presets.pop();
            return Err(err);
        }
        Ok(preset)
    }

    pub fn delete(&mut self, id: &str) -> Result<bool, PersistError> {
        let Some(index) = self.presets.iter().position(|preset| preset.id == id) else {
            return Ok(false);
        };
        let removed = self.presets.remove(index);
        if let Err(err) = self.flush() {
            self.presets.insert(index, removed);
            return Err(err);
        }
        Ok(true)
    }

    fn flush(&self) -> Result<(), PersistError> {
        let body = serde_json::to_vec_pretty(&self.presets)?;
        write_atomic(&self.path, &body)
    }
}

fn decode_entries(path: &Path, entries: Vec<Value>) -> Vec<FilterPreset> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, entry)| match serde_json::from_value::<FilterPreset>(entry) {
                Ok(preset) => Some(preset),
                Err(err) => {
                    modq_warn!(
                        "Skipping preset #{} in {}: {}",
                        index,
                        path.display(),
                        err
                    );
                    None
                }
            },
        )
        .collect()
}
