use crate::types::BaseLimits;
use crate::{ControlError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceControlConfig {
    pub max_linear_x: f64,
    pub max_linear_y: f64,
    /// Degrees per second; converted to radians for [`BaseLimits`].
    pub max_angular_z_deg: f64,
    pub rate_hz: f64,
    pub input_topic: String,
    pub output_topic: String,
}

impl Default for VoiceControlConfig {
    fn default() -> Self {
        Self {
            max_linear_x: 0.2,
            max_linear_y: 0.2,
            max_angular_z_deg: 30.0,
            rate_hz: 10.0,
            input_topic: "recognizer/output".to_string(),
            output_topic: "/movo/base/voice_control/cmd_vel".to_string(),
        }
    }
}

impl VoiceControlConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_linear_x", self.max_linear_x),
            ("max_linear_y", self.max_linear_y),
            ("max_angular_z_deg", self.max_angular_z_deg),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ControlError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if !self.rate_hz.is_finite()
            || self.rate_hz <= 0.0
            || Duration::try_from_secs_f64(1.0 / self.rate_hz).is_err()
        {
            return Err(ControlError::InvalidConfig(format!(
                "rate_hz must be positive, got {}",
                self.rate_hz
            )));
        }
        Ok(())
    }

    pub fn limits(&self) -> BaseLimits {
        BaseLimits {
            max_linear_x: self.max_linear_x,
            max_linear_y: self.max_linear_y,
            max_angular_z: self.max_angular_z_deg.to_radians(),
        }
    }

    /// Tick period. Call [`validate`](Self::validate) first.
    pub fn period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rate_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_base_limits() -> Result<()> {
        let cfg = VoiceControlConfig::default();
        cfg.validate()?;
        assert_eq!(cfg.limits(), BaseLimits::default());
        assert_eq!(cfg.period(), Duration::from_millis(100));
        Ok(())
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            VoiceControlConfig {
                rate_hz: 0.0,
                ..Default::default()
            },
            VoiceControlConfig {
                rate_hz: f64::NAN,
                ..Default::default()
            },
            VoiceControlConfig {
                rate_hz: 1e-300,
                ..Default::default()
            },
            VoiceControlConfig {
                max_linear_x: -0.1,
                ..Default::default()
            },
            VoiceControlConfig {
                max_angular_z_deg: f64::INFINITY,
                ..Default::default()
            },
        ];
        for cfg in bad {
            assert!(matches!(
                cfg.validate(),
                Err(ControlError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn partial_json_falls_back_to_defaults() -> Result<()> {
        let cfg: VoiceControlConfig = serde_json::from_str(r#"{ "rate_hz": 20.0 }"#)?;
        assert_eq!(cfg.rate_hz, 20.0);
        assert_eq!(cfg.max_linear_x, 0.2);
        assert_eq!(cfg.input_topic, "recognizer/output");
        Ok(())
    }

    #[test]
    fn save_then_load() -> Result<()> {
        let path = std::env::temp_dir().join(format!(
            "voice-control-config-{}.json",
            std::process::id()
        ));
        let cfg = VoiceControlConfig {
            max_linear_y: 0.3,
            output_topic: "/base/cmd_vel".to_string(),
            ..Default::default()
        };
        cfg.save(&path)?;
        let loaded = VoiceControlConfig::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded?, cfg);
        Ok(())
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = VoiceControlConfig::load("/nonexistent/voice-control.json");
        assert!(matches!(err, Err(ControlError::Io(_))));
    }
}
