use std::{collections::HashSet, fs, path::Path, time::Duration};

use serde::Deserialize;
use crate::{catalog::Catalog, error::ConfigError, model::ALL_CATEGORIES};


// Longest accepted per-line cooking step, one minute
pub const MAX_COOK_STEP_MS: u64 = 60_000;


// Durations, geometry constants and thresholds of the screen
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub flight_ms: u64,
    pub frame_ms: u64,
    pub bounce_ms: u64,
    pub cook_step_ms: u64,
    pub attach_settle_ms: u64,
    pub tab_settle_ms: u64,
    pub arc_lift: f64,
    pub ball_half_size: f64,
    pub voice_cancel_distance: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            flight_ms: 500,
            frame_ms: 16,
            bounce_ms: 400,
            cook_step_ms: 1500,
            attach_settle_ms: 300,
            tab_settle_ms: 100,
            arc_lift: 100.0,
            ball_half_size: 15.0,
            voice_cancel_distance: 80.0,
        }
    }
}

impl Timing {
    pub fn flight(&self) -> Duration {
        Duration::from_millis(self.flight_ms)
    }

    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn bounce(&self) -> Duration {
        Duration::from_millis(self.bounce_ms)
    }

    // Completion delay of the line at `position` within its order
    pub fn cook_delay(&self, position: usize) -> Duration {
        let steps = u64::try_from(position).unwrap_or(u64::MAX).saturating_add(1);
        Duration::from_millis(self.cook_step_ms.saturating_mul(steps))
    }

    pub fn attach_settle(&self) -> Duration {
        Duration::from_millis(self.attach_settle_ms)
    }

    pub fn tab_settle(&self) -> Duration {
        Duration::from_millis(self.tab_settle_ms)
    }
}


#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timing: Timing,
    pub catalog: Catalog,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.flight_ms == 0 || self.timing.frame_ms == 0 {
            return Err(ConfigError::Invalid(
                "flight_ms and frame_ms must be greater than zero".into(),
            ));
        }
        if self.timing.cook_step_ms > MAX_COOK_STEP_MS {
            return Err(ConfigError::Invalid(format!(
                "cook_step_ms must be at most {MAX_COOK_STEP_MS}"
            )));
        }

        let mut seen = HashSet::new();
        for item in &self.catalog.items {
            if !seen.insert(item.id) {
                return Err(ConfigError::Invalid(format!("duplicate catalog item id {}", item.id)));
            }
        }

        if !self.catalog.categories.iter().any(|c| c.id == ALL_CATEGORIES) {
            return Err(ConfigError::Invalid(format!(
                "categories must include the \"{ALL_CATEGORIES}\" selector"
            )));
        }
        Ok(())
    }
}


pub fn parse_settings(raw: &str) -> Result<Settings, ConfigError> {
    let settings: Settings = toml::from_str(raw)?;
    settings.validate()?;
    Ok(settings)
}


// Built-in defaults unless a settings file is given
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&raw)
}
