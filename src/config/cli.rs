use crate::config::scenario::ScenarioConfig;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "favorites-presenter")]
#[command(about = "Replay a favorites session against the presenter")]
pub struct CliConfig {
    /// Path to the TOML scenario file
    #[arg(short, long, default_value = "favorites-scenario.toml")]
    pub scenario: String,

    /// Override the scenario's premium entitlement
    #[arg(long)]
    pub premium: Option<bool>,

    /// Override the scenario's username
    #[arg(long)]
    pub username: Option<String>,

    /// Runtime yields between replayed events
    #[arg(long)]
    pub settle_rounds: Option<usize>,

    /// Print the replay report as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 將命令列覆蓋套用到情境設定
    pub fn apply_overrides(&self, scenario: &mut ScenarioConfig) {
        if let Some(premium) = self.premium {
            scenario.account.premium = premium;
            tracing::info!("🔧 Premium overridden to: {}", premium);
        }
        if let Some(username) = &self.username {
            scenario.account.username = Some(username.clone());
            tracing::info!("🔧 Username overridden to: {}", username);
        }
        if let Some(rounds) = self.settle_rounds {
            scenario.replay.settle_rounds = Some(rounds);
        }
        if !self.json && scenario.replay.echo.is_none() {
            scenario.replay.echo = Some(true);
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("scenario", &self.scenario)?;
        validation::validate_file_extensions("scenario", std::slice::from_ref(&self.scenario), &["toml"])?;
        if let Some(rounds) = self.settle_rounds {
            validation::validate_positive_number("settle_rounds", rounds, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let config = CliConfig::parse_from([
            "favorites-presenter",
            "--scenario",
            "session.toml",
            "--premium",
            "true",
            "--username",
            "Manu",
        ]);

        let mut scenario = ScenarioConfig::default();
        config.apply_overrides(&mut scenario);

        assert!(config.validate().is_ok());
        assert!(scenario.account.premium);
        assert_eq!(scenario.account.username.as_deref(), Some("Manu"));
        assert!(scenario.echo());
    }

    #[test]
    fn test_rejects_non_toml_scenario() {
        let config = CliConfig::parse_from(["favorites-presenter", "--scenario", "session.yaml"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_output_disables_echo() {
        let config = CliConfig::parse_from(["favorites-presenter", "--json"]);
        let mut scenario = ScenarioConfig::default();
        config.apply_overrides(&mut scenario);
        assert!(!scenario.echo());
    }
}
