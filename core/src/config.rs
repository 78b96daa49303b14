use thiserror::Error;

use crate::params::*;
use crate::world::TemplateId;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite, non-negative number of seconds (got {value})")]
    InvalidInterval { name: &'static str, value: f32 },
    #[error("{name} must be a finite number of seconds (got {value})")]
    InvalidDelay { name: &'static str, value: f32 },
    #[error("think interval must be greater than zero (got {value})")]
    ThinkIntervalNotPositive { value: f32 },
    #[error("squad size must be at least 1")]
    EmptySquad,
    #[error("unit list {index} has a non-finite time window")]
    InvalidWindow { index: usize },
}

/// When a unit list may be drawn from, in match seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TimeWindow {
    Always,
    ActiveBeforeTime(f32),
    ActiveAfterTime(f32),
}

impl TimeWindow {
    pub fn is_active(&self, match_time: f32) -> bool {
        match self {
            TimeWindow::Always => true,
            TimeWindow::ActiveBeforeTime(time) => match_time < *time,
            TimeWindow::ActiveAfterTime(time) => match_time >= *time,
        }
    }

    fn is_finite(&self) -> bool {
        match self {
            TimeWindow::Always => true,
            TimeWindow::ActiveBeforeTime(time) | TimeWindow::ActiveAfterTime(time) => {
                time.is_finite()
            }
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow::Always
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildList {
    pub window: TimeWindow,
    pub units: Vec<TemplateId>,
}

impl BuildList {
    pub fn new(window: TimeWindow, units: Vec<TemplateId>) -> Self {
        Self { window, units }
    }

    pub fn always(units: Vec<TemplateId>) -> Self {
        Self::new(TimeWindow::Always, units)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AiConfig {
    pub think_interval: f32,
    pub building_interval: f32,
    pub unit_interval: f32,
    pub building_start_delay: f32,
    pub unit_start_delay: f32,
    pub squad_size: usize,
    pub max_same_buildings: usize,
    /// `None` entries are placeholders and are skipped.
    pub building_priority: Vec<Option<TemplateId>>,
    pub unit_lists: Vec<BuildList>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            think_interval: THINK_INTERVAL,
            building_interval: BUILDING_BUY_INTERVAL,
            unit_interval: UNIT_BUY_INTERVAL,
            building_start_delay: BUILDING_START_DELAY,
            unit_start_delay: UNIT_START_DELAY,
            squad_size: SQUAD_SIZE,
            max_same_buildings: MAX_SAME_BUILDINGS,
            building_priority: vec![],
            unit_lists: vec![],
        }
    }
}

impl AiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("think interval", self.think_interval),
            ("building interval", self.building_interval),
            ("unit interval", self.unit_interval),
        ] {
            if !value.is_finite() || value < 0f32 {
                return Err(ConfigError::InvalidInterval { name, value });
            }
        }
        if self.think_interval <= 0f32 {
            return Err(ConfigError::ThinkIntervalNotPositive {
                value: self.think_interval,
            });
        }
        for (name, value) in [
            ("building start delay", self.building_start_delay),
            ("unit start delay", self.unit_start_delay),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidDelay { name, value });
            }
        }
        if self.squad_size == 0 {
            return Err(ConfigError::EmptySquad);
        }
        if let Some(index) = self.unit_lists.iter().position(|l| !l.window.is_finite()) {
            return Err(ConfigError::InvalidWindow { index });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(AiConfig::default().validate(), Ok(()));
    }

    #[test]
    fn negative_interval_rejected() {
        let config = AiConfig {
            unit_interval: -1f32,
            ..AiConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidInterval {
                name: "unit interval",
                value: -1f32
            })
        );
    }

    #[test]
    fn zero_think_interval_rejected() {
        let config = AiConfig {
            think_interval: 0f32,
            ..AiConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThinkIntervalNotPositive { value: 0f32 })
        );
        let config = AiConfig {
            building_interval: 0f32,
            unit_interval: 0f32,
            ..AiConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_delay_allowed() {
        let config = AiConfig {
            unit_start_delay: -5f32,
            ..AiConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_squad_rejected() {
        let config = AiConfig {
            squad_size: 0,
            ..AiConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySquad));
    }

    #[test]
    fn windows() {
        assert!(TimeWindow::Always.is_active(1_000f32));
        assert!(TimeWindow::ActiveBeforeTime(60f32).is_active(59.9f32));
        assert!(!TimeWindow::ActiveBeforeTime(60f32).is_active(60f32));
        assert!(!TimeWindow::ActiveAfterTime(60f32).is_active(59.9f32));
        assert!(TimeWindow::ActiveAfterTime(60f32).is_active(60f32));
    }

    #[test]
    fn infinite_window_rejected() {
        let config = AiConfig {
            unit_lists: vec![
                BuildList::always(vec![]),
                BuildList::new(TimeWindow::ActiveAfterTime(f32::NAN), vec![]),
            ],
            ..AiConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidWindow { index: 1 }));
    }
}
