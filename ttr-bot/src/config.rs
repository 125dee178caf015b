use thiserror::Error;

use crate::planner::DEFAULT_MAX_EXPANSIONS;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Risk appetite {0} is outside [0, 1]")]
    RiskOutOfRange(f64),
    #[error("Player name {0:?} has no `_<risk>` suffix")]
    BadName(String),
}

/// Tuning knobs for the planning strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfig {
    /// 0 plays safe, 1 plays aggressively.
    pub risk_appetite: f64,
    pub simulation_trials: u32,
    pub seed: u32,
    pub max_expansions: usize,
}

impl PolicyConfig {
    pub fn new(risk_appetite: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&risk_appetite) {
            return Err(ConfigError::RiskOutOfRange(risk_appetite));
        }
        Ok(PolicyConfig {
            risk_appetite,
            ..PolicyConfig::default()
        })
    }

    /// Reads the risk appetite from a name such as `caleb_0.5`.
    pub fn from_player_name(name: &str) -> Result<Self, ConfigError> {
        let risk = name
            .rsplit('_')
            .next()
            .filter(|_| name.contains('_'))
            .and_then(|suffix| suffix.parse::<f64>().ok())
            .ok_or_else(|| ConfigError::BadName(name.to_string()))?;
        PolicyConfig::new(risk)
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_trials(mut self, trials: u32) -> Self {
        self.simulation_trials = trials;
        self
    }

    /// Opponents with fewer spare trains than this are treated as able to end the game.
    pub fn endgame_threshold(&self) -> u32 {
        (3.0 + 2.0 * self.risk_appetite).ceil() as u32
    }

    /// Quantile used when inverting draw distributions, 99% at no risk down to 80%.
    pub fn confidence(&self) -> f64 {
        0.99 - 0.19 * self.risk_appetite
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            risk_appetite: 0.5,
            simulation_trials: 200,
            seed: 1,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_derived_values() {
        let safe = PolicyConfig::new(0.0).unwrap();
        assert_eq!(safe.endgame_threshold(), 3);
        assert!((safe.confidence() - 0.99).abs() < 1e-9);

        let bold = PolicyConfig::new(1.0).unwrap();
        assert_eq!(bold.endgame_threshold(), 5);
        assert!((bold.confidence() - 0.80).abs() < 1e-9);

        assert_eq!(PolicyConfig::new(0.5).unwrap().endgame_threshold(), 4);
    }

    #[test]
    fn test_from_player_name() {
        let config = PolicyConfig::from_player_name("caleb_0.25").unwrap();
        assert!((config.risk_appetite - 0.25).abs() < 1e-9);

        assert_eq!(
            PolicyConfig::from_player_name("caleb"),
            Err(ConfigError::BadName("caleb".into()))
        );
        assert_eq!(
            PolicyConfig::from_player_name("caleb_fast"),
            Err(ConfigError::BadName("caleb_fast".into()))
        );
        assert_eq!(
            PolicyConfig::from_player_name("caleb_1.5"),
            Err(ConfigError::RiskOutOfRange(1.5))
        );
    }
}
