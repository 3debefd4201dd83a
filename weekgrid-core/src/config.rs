//! Global weekgrid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::plan::Plan;

static DEFAULT_AGENDA_PATH: &str = "~/agendas";

fn default_agenda_path() -> PathBuf {
    PathBuf::from(DEFAULT_AGENDA_PATH)
}

fn is_default_agenda_path(p: &PathBuf) -> bool {
    *p == default_agenda_path()
}

/// Global configuration at ~/.config/weekgrid/config.toml
///
/// Everything agenda-specific lives inside the agenda documents
/// themselves; this file only locates them and records the account tier.
#[derive(Serialize, Deserialize, Clone)]
pub struct GlobalConfig {
    #[serde(
        default = "default_agenda_path",
        skip_serializing_if = "is_default_agenda_path"
    )]
    pub agenda_dir: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_agenda: Option<String>,

    /// Plan tier; stands in for the billing provider's verdict.
    #[serde(default)]
    pub plan: Plan,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            agenda_dir: default_agenda_path(),
            default_agenda: None,
            plan: Plan::default(),
        }
    }
}

impl GlobalConfig {
    pub fn config_path() -> ScheduleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScheduleError::Config("Could not determine config directory".into()))?
            .join("weekgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Save the current config to ~/.config/weekgrid/config.toml
    pub fn save(&self) -> ScheduleResult<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ScheduleError::Config(format!("Could not create config directory: {e}")))?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ScheduleError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| ScheduleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> ScheduleResult<()> {
        let contents = format!(
            "\
# weekgrid configuration

# Where your agendas live:
# agenda_dir = \"{}\"

# Agenda used when none is named on the command line:
# default_agenda = \"team\"

# Plan tier (test, free, pro):
# plan = \"free\"
",
            DEFAULT_AGENDA_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScheduleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ScheduleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
