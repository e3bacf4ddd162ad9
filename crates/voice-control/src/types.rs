use serde::{Deserialize, Serialize};

/// Configured speed ceilings of the base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseLimits {
    /// m/s
    pub max_linear_x: f64,
    /// m/s
    pub max_linear_y: f64,
    /// rad/s
    pub max_angular_z: f64,
}

impl BaseLimits {
    pub fn full(&self) -> SpeedScale {
        SpeedScale {
            x: self.max_linear_x,
            y: self.max_linear_y,
            rotation: self.max_angular_z,
        }
    }

    pub fn half(&self) -> SpeedScale {
        SpeedScale {
            x: self.max_linear_x / 2.0,
            y: self.max_linear_y / 2.0,
            rotation: self.max_angular_z / 2.0,
        }
    }
}

impl Default for BaseLimits {
    fn default() -> Self {
        Self {
            max_linear_x: 0.2,
            max_linear_y: 0.2,
            max_angular_z: 30.0_f64.to_radians(),
        }
    }
}

/// Magnitudes currently in effect on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedScale {
    pub x: f64,
    pub y: f64,
    /// Tracked alongside the linear axes but never emitted.
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedLevel {
    Full,
    Half,
}

impl SpeedLevel {
    pub fn scale(self, limits: &BaseLimits) -> SpeedScale {
        match self {
            SpeedLevel::Full => limits.full(),
            SpeedLevel::Half => limits.half(),
        }
    }
}

/// Unit (or zero) direction in the base frame. At most one axis is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub x: f64,
    pub y: f64,
}

impl Direction {
    pub const STOP: Self = Self { x: 0.0, y: 0.0 };
    pub const FORWARD: Self = Self { x: 1.0, y: 0.0 };
    pub const BACKWARD: Self = Self { x: -1.0, y: 0.0 };
    pub const LEFT: Self = Self { x: 0.0, y: 1.0 };
    pub const RIGHT: Self = Self { x: 0.0, y: -1.0 };

    pub fn is_stop(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// The persistent (speed, direction) pair the publisher keeps replaying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionIntent {
    pub speed: SpeedScale,
    pub direction: Direction,
}

impl MotionIntent {
    /// Startup state: full speed, not moving.
    pub fn at_rest(limits: &BaseLimits) -> Self {
        Self {
            speed: limits.full(),
            direction: Direction::STOP,
        }
    }

    /// Componentwise `direction * speed`. Angular output stays zero.
    pub fn command(&self) -> VelocityCommand {
        VelocityCommand {
            linear: Linear {
                x: self.direction.x * self.speed.x,
                y: self.direction.y * self.speed.y,
            },
            angular: Angular { z: 0.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Linear {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Angular {
    pub z: f64,
}

/// One sample on the outbound velocity channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VelocityCommand {
    pub linear: Linear,
    pub angular: Angular,
}

impl VelocityCommand {
    pub const ZERO: Self = Self {
        linear: Linear { x: 0.0, y: 0.0 },
        angular: Angular { z: 0.0 },
    };

    pub fn is_zero(&self) -> bool {
        self.linear.x == 0.0 && self.linear.y == 0.0 && self.angular.z == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_at_full_speed() {
        let limits = BaseLimits::default();
        let intent = MotionIntent {
            speed: limits.full(),
            direction: Direction::FORWARD,
        };
        let cmd = intent.command();
        assert_eq!(cmd.linear.x, 0.2);
        assert_eq!(cmd.linear.y, 0.0);
        assert_eq!(cmd.angular.z, 0.0);
    }

    #[test]
    fn left_at_half_speed() {
        let limits = BaseLimits::default();
        let intent = MotionIntent {
            speed: limits.half(),
            direction: Direction::LEFT,
        };
        let cmd = intent.command();
        assert_eq!(cmd.linear.x, 0.0);
        assert_eq!(cmd.linear.y, 0.1);
    }

    #[test]
    fn rotation_is_tracked_but_not_emitted() {
        let limits = BaseLimits::default();
        assert!((limits.max_angular_z - std::f64::consts::PI / 6.0).abs() < 1e-12);
        assert_eq!(limits.half().rotation, limits.max_angular_z / 2.0);
        let intent = MotionIntent {
            speed: limits.full(),
            direction: Direction::RIGHT,
        };
        assert_eq!(intent.command().angular.z, 0.0);
        assert_eq!(intent.command().linear.y, -0.2);
    }

    #[test]
    fn rest_state_emits_zero() {
        let intent = MotionIntent::at_rest(&BaseLimits::default());
        assert!(intent.direction.is_stop());
        assert!(intent.command().is_zero());
    }
}
