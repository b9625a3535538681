//! `slots.toml` loading.

use anyhow::{Context, Result};
use serde::Deserialize;
use slot_engine::slots::DEFAULT_MINIMUM_NOTICE_HOURS;
use slot_engine::{InterviewTemplate, SlotError, StaticScheduleProvider, TemplateCatalog};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "slots.toml";

fn default_notice_hours() -> i64 {
    DEFAULT_MINIMUM_NOTICE_HOURS
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// JSON file of busy schedules. Relative paths resolve against the config file.
    #[serde(default)]
    pub schedules: Option<PathBuf>,
    #[serde(default = "default_notice_hours")]
    pub minimum_notice_hours: i64,
    #[serde(default)]
    pub templates: Vec<InterviewTemplate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedules: None,
            minimum_notice_hours: DEFAULT_MINIMUM_NOTICE_HOURS,
            templates: Vec::new(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut cfg: Config = toml::from_str(&s)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        if let (Some(schedules), Some(dir)) = (cfg.schedules.as_ref(), path.parent()) {
            if schedules.is_relative() {
                cfg.schedules = Some(dir.join(schedules));
            }
        }
        Ok(cfg)
    }

    /// Load `path` if given, else `slots.toml` if it exists, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load_from(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn catalog(&self) -> TemplateCatalog {
        TemplateCatalog::new(self.templates.iter().cloned())
    }

    /// Build the schedule provider, preferring `override_path` over the config entry.
    ///
    /// With neither, every interviewer is treated as having no busy time.
    pub fn provider(&self, override_path: Option<&Path>) -> Result<StaticScheduleProvider> {
        match override_path.or(self.schedules.as_deref()) {
            Some(path) => StaticScheduleProvider::from_path(path)
                .with_context(|| format!("Failed to load schedules: {}", path.display())),
            None => {
                tracing::warn!("no schedules configured; treating everyone as free");
                Ok(StaticScheduleProvider::default())
            }
        }
    }

    /// Hours beyond what a `chrono::Duration` can hold are rejected, not clamped.
    pub fn minimum_notice(&self) -> Result<chrono::Duration, SlotError> {
        chrono::Duration::try_hours(self.minimum_notice_hours).ok_or_else(|| {
            SlotError::InvalidQuery {
                field: "minimum_notice_hours".to_string(),
                message: format!("{} hours is out of range", self.minimum_notice_hours),
            }
        })
    }
}
