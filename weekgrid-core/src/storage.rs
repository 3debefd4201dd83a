//! Agenda document storage.
//!
//! Each agenda persists as one JSON document in the agenda directory.
//! Saving replaces the whole document (last write wins); there is no
//! finer-grained diffing. Filenames are slugs of the agenda name, with
//! numeric suffixes on collision.

use std::path::{Path, PathBuf};

// `::config` is the external crate; `crate::config` is our own module
use ::config::{Config, File};

use crate::config::GlobalConfig;
use crate::error::{ScheduleError, ScheduleResult};
use crate::plan::Plan;
use crate::schedule::{Schedule, ScheduleSummary};

pub struct AgendaDir {
    config: GlobalConfig,
}

impl AgendaDir {
    pub fn load() -> ScheduleResult<Self> {
        let config_path = GlobalConfig::config_path()?;

        let config: GlobalConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| ScheduleError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ScheduleError::Config(e.to_string()))?;

        Ok(AgendaDir { config })
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    pub fn plan(&self) -> Plan {
        self.config.plan
    }

    pub fn default_agenda(&self) -> Option<&str> {
        self.config.default_agenda.as_deref()
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.agenda_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Summaries of every agenda document in the directory, sorted by name.
    pub fn list(&self) -> ScheduleResult<Vec<ScheduleSummary>> {
        let dir = self.data_path();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut summaries: Vec<ScheduleSummary> = std::fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "json"))
            .filter_map(|path| {
                let slug = path.file_stem()?.to_string_lossy().to_string();
                read_document(&path).map(|schedule| schedule.summary(&slug))
            })
            .collect();

        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }

    /// Load an agenda by its filename slug, falling back to a scan by
    /// document id.
    pub fn load_agenda(&self, slug: &str) -> ScheduleResult<Schedule> {
        let path = self.data_path().join(format!("{}.json", slug));
        if path.exists() {
            return read_document(&path)
                .ok_or_else(|| ScheduleError::AgendaNotFound(slug.to_string()));
        }

        self.find_by_id(slug)?
            .map(|(_, schedule)| schedule)
            .ok_or_else(|| ScheduleError::AgendaNotFound(slug.to_string()))
    }

    /// Write the agenda document, replacing any previous version. The
    /// document keeps its file when only content changed; a renamed
    /// agenda moves to a fresh slug and the old file is removed.
    ///
    /// Returns the slug the document was saved under.
    pub fn save(&self, schedule: &Schedule) -> ScheduleResult<String> {
        let dir = self.data_path();
        std::fs::create_dir_all(&dir)?;

        let existing = self.find_by_id(&schedule.id)?;
        let filename = filename_for(schedule, &dir)?;
        let path = dir.join(&filename);

        if let Some((old_path, _)) = existing
            && old_path != path
        {
            std::fs::remove_file(&old_path)?;
        }

        let content = serde_json::to_string_pretty(schedule)
            .map_err(|e| ScheduleError::Serialization(e.to_string()))?;
        std::fs::write(&path, content)?;

        Ok(filename.trim_end_matches(".json").to_string())
    }

    /// Delete an agenda document by slug.
    pub fn delete(&self, slug: &str) -> ScheduleResult<()> {
        let path = self.data_path().join(format!("{}.json", slug));
        if !path.exists() {
            return Err(ScheduleError::AgendaNotFound(slug.to_string()));
        }

        std::fs::remove_file(&path)?;
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> ScheduleResult<Option<(PathBuf, Schedule)>> {
        let dir = self.data_path();
        if !dir.exists() {
            return Ok(None);
        }

        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json")
                && let Some(schedule) = read_document(&path)
                && schedule.id == id
            {
                return Ok(Some((path, schedule)));
            }
        }

        Ok(None)
    }
}

fn read_document(path: &Path) -> Option<Schedule> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

// =============================================================================
// Filename generation
// =============================================================================

/// Generate a unique filename for an agenda, handling collisions.
fn filename_for(schedule: &Schedule, dir: &Path) -> ScheduleResult<String> {
    let base = format!("{}.json", slugify(&schedule.name));
    let stem = base.trim_end_matches(".json");

    if !dir.join(&base).exists() || file_has_id(dir, &base, &schedule.id) {
        return Ok(base);
    }

    // Collision - try suffixes
    for n in 2..=100 {
        let suffixed = format!("{}-{}.json", stem, n);
        if !dir.join(&suffixed).exists() || file_has_id(dir, &suffixed, &schedule.id) {
            return Ok(suffixed);
        }
    }

    Err(ScheduleError::Config(format!(
        "Too many filename collisions for {}",
        base
    )))
}

fn file_has_id(dir: &Path, filename: &str, id: &str) -> bool {
    read_document(&dir.join(filename)).is_some_and(|s| s.id == id)
}

pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Team Agenda"), "team-agenda");
        assert_eq!(slugify("Shop: Q4 Rota!"), "shop-q4-rota");
        assert_eq!(slugify("  Lots   of   spaces  "), "lots-of-spaces");
        assert_eq!(slugify("Special@#$%Characters"), "special-characters");
    }

    #[test]
    fn test_slugify_truncates_long_names() {
        let long_name = "a".repeat(100);
        assert_eq!(slugify(&long_name).len(), 50);
    }
}
