//! Data-driven game balance
//!
//! Every gameplay number that is a policy rather than a physical constant
//! lives here, so a balance pass never touches simulation code. Loadable
//! from JSON; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

/// Gameplay balance and rule configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Score needed for a winning verdict at game over
    pub winning_score: u32,
    /// Run length in milliseconds
    pub time_limit: f32,
    /// End the game when the clock runs out
    pub end_on_time_limit: bool,
    /// End the game the moment the winning score is reached. Off by
    /// default: the run normally plays out the full clock.
    pub end_on_winning_score: bool,

    /// Ammo in the clip at game start
    pub start_ammo: u32,
    /// Ammo cap during normal play
    pub max_ammo: u32,
    /// Ammo cap while the power-up is active
    pub max_power_up_ammo: u32,
    /// Milliseconds per passive ammo refill
    pub ammo_interval: f32,
    /// Milliseconds per ammo refill while powered up
    pub power_up_ammo_interval: f32,
    /// Power-up duration in milliseconds
    pub power_up_limit: f32,

    /// Milliseconds between automatic enemy spawns
    pub enemy_interval: f32,
    /// Global horizontal scroll rate in pixels/sec
    pub scroll_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            winning_score: 80,
            time_limit: 30_000.0,
            end_on_time_limit: true,
            end_on_winning_score: false,
            start_ammo: 20,
            max_ammo: 50,
            max_power_up_ammo: 100,
            ammo_interval: 350.0,
            power_up_ammo_interval: 150.0,
            power_up_limit: 10_000.0,
            enemy_interval: 1_000.0,
            scroll_speed: 60.0,
        }
    }
}

impl Tuning {
    /// Parse from JSON; unspecified fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        let restored = Tuning::from_json(&json).unwrap();
        assert_eq!(restored, tuning);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"winning_score": 40, "enemy_interval": 500.0}"#).unwrap();
        assert_eq!(tuning.winning_score, 40);
        assert_eq!(tuning.enemy_interval, 500.0);
        assert_eq!(tuning.max_ammo, Tuning::default().max_ammo);
        assert!(tuning.end_on_time_limit);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("not json").is_err());
    }
}
