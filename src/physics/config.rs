//! Per-simulation tuning
//!
//! One level or game mode owns one `SimConfig`; hosts persist it next to
//! level data, so it round-trips through serde.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Tuning constants for one simulation instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Downward acceleration in world units/s² (+Y is down). Any sign is
    /// allowed; negative values float bodies upward.
    pub gravity: f32,
    /// Cap on downward speed in world units/s
    pub terminal_velocity: f32,
    /// Horizontal velocity multiplier applied each grounded tick
    pub friction: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: consts::GRAVITY,
            terminal_velocity: consts::TERMINAL_VELOCITY,
            friction: consts::GROUND_FRICTION,
        }
    }
}

impl SimConfig {
    /// Clamp loaded values into usable ranges: friction to [0, 1], terminal
    /// velocity to >= 0. Gravity passes through unchanged.
    pub fn sanitize(mut self) -> Self {
        self.friction = self.friction.clamp(0.0, 1.0);
        self.terminal_velocity = self.terminal_velocity.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_consts() {
        let config = SimConfig::default();
        assert_eq!(config.gravity, consts::GRAVITY);
        assert_eq!(config.terminal_velocity, consts::TERMINAL_VELOCITY);
        assert_eq!(config.friction, consts::GROUND_FRICTION);
    }

    #[test]
    fn test_sanitize_clamps() {
        let config = SimConfig {
            gravity: -50.0,
            terminal_velocity: -10.0,
            friction: 1.7,
        }
        .sanitize();
        assert_eq!(config.friction, 1.0);
        assert_eq!(config.terminal_velocity, 0.0);
        // Negative gravity is a feature, not an error
        assert_eq!(config.gravity, -50.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = SimConfig {
            gravity: 900.0,
            terminal_velocity: 480.0,
            friction: 0.65,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
