//! Engine configuration with validation and defaults.
//!
//! One root config struct of per-concern sections, each with production
//! defaults. Call [`EngineConfig::validate`] after deserializing an
//! operator-supplied config.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the engine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub economy: EconomyConfig,
    pub rewards: RewardConfig,
    pub blackjack: BlackjackConfig,
    pub store: StoreConfig,
}

/// Economy constants: starting balance and leveling curve.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EconomyConfig {
    /// Balance granted to a record created on first lookup.
    pub starting_cash: i64,
    /// XP awarded for any winning settlement.
    pub xp_per_win: u64,
    /// XP required per level; level is always `xp / xp_per_level`.
    pub xp_per_level: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_cash: 1000,
            xp_per_win: 100,
            xp_per_level: 1000,
        }
    }
}

/// Daily and work reward amounts and cooldowns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewardConfig {
    pub daily_base: i64,
    /// Extra daily payout per player level.
    pub daily_level_bonus: i64,
    pub work_min: i64,
    pub work_max: i64,
    /// Extra work payout per player level.
    pub work_level_bonus: i64,
    pub work_cooldown_secs: u64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            daily_base: 1000,
            daily_level_bonus: 100,
            work_min: 100,
            work_max: 500,
            work_level_bonus: 10,
            work_cooldown_secs: 600,
        }
    }
}

/// Blackjack table rules.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlackjackConfig {
    /// Decks shuffled into each session's shoe.
    pub decks: u8,
    /// Dealer draws until reaching this (soft-adjusted) total.
    pub dealer_stand: u8,
    /// Inactivity window before a session forfeits.
    pub session_timeout_secs: u64,
}

impl Default for BlackjackConfig {
    fn default() -> Self {
        Self {
            decks: 6,
            dealer_stand: 17,
            session_timeout_secs: 60,
        }
    }
}

/// Backing store location.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    pub data_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: "player_data.json".to_string(),
        }
    }
}

impl EngineConfig {
    /// Validate logical consistency of the assembled configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.economy.starting_cash < 0 {
            return Err(ConfigError::InvalidValue(
                "starting_cash must not be negative".to_string(),
            ));
        }
        if self.economy.xp_per_level == 0 {
            return Err(ConfigError::InvalidValue(
                "xp_per_level must be > 0".to_string(),
            ));
        }
        if self.rewards.work_min > self.rewards.work_max {
            return Err(ConfigError::InvalidValue(
                "work_min must not exceed work_max".to_string(),
            ));
        }
        if self.blackjack.decks == 0 {
            return Err(ConfigError::InvalidValue(
                "blackjack.decks must be > 0".to_string(),
            ));
        }
        if self.blackjack.dealer_stand == 0 || self.blackjack.dealer_stand > 21 {
            return Err(ConfigError::InvalidValue(
                "blackjack.dealer_stand must be within 1..=21".to_string(),
            ));
        }
        Ok(())
    }

    pub fn work_cooldown(&self) -> Duration {
        Duration::from_secs(self.rewards.work_cooldown_secs)
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.blackjack.session_timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn default_constants_match_the_economy() {
        let config = EngineConfig::default();
        assert_eq!(config.economy.starting_cash, 1000);
        assert_eq!(config.economy.xp_per_level, 1000);
        assert_eq!(config.rewards.work_cooldown_secs, 600);
        assert_eq!(config.blackjack.decks, 6);
    }

    #[test]
    fn inverted_work_range_is_rejected() {
        let mut config = EngineConfig::default();
        config.rewards.work_min = 900;
        config.rewards.work_max = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_deck_shoe_is_rejected() {
        let mut config = EngineConfig::default();
        config.blackjack.decks = 0;
        assert!(config.validate().is_err());
    }
}
