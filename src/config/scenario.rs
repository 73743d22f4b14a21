use crate::domain::model::{Highlight, SwishCard};
use crate::utils::error::{PresenterError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_SETTLE_ROUNDS: usize = 16;

/// A scripted favorites session: account state, backfill, then a sequence
/// of events replayed against the presenter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: Option<ScenarioInfo>,
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
    /// Existing favorites delivered on the backfill stream.
    #[serde(default)]
    pub favorites: Vec<Highlight>,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    pub username: Option<String>,
    #[serde(default)]
    pub premium: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayConfig {
    pub settle_rounds: Option<usize>,
    pub echo: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioEvent {
    FavoriteClick { highlight: Highlight },
    FavoriteDeletion { highlight: Highlight },
    OpenHighlight { highlight: Highlight },
    OpenSubmission { highlight: Highlight },
    ShareHighlight { highlight: Highlight },
    /// Server push on the incremental stream.
    NewlyAdded { highlight: Highlight },
    SwishCardExplore { card: SwishCard },
    SwishCardGotIt { card: SwishCard },
    /// Entitlement changes mid-session.
    SetPremium { premium: bool },
}

impl ScenarioEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioEvent::FavoriteClick { .. } => "favorite_click",
            ScenarioEvent::FavoriteDeletion { .. } => "favorite_deletion",
            ScenarioEvent::OpenHighlight { .. } => "open_highlight",
            ScenarioEvent::OpenSubmission { .. } => "open_submission",
            ScenarioEvent::ShareHighlight { .. } => "share_highlight",
            ScenarioEvent::NewlyAdded { .. } => "newly_added",
            ScenarioEvent::SwishCardExplore { .. } => "swish_card_explore",
            ScenarioEvent::SwishCardGotIt { .. } => "swish_card_got_it",
            ScenarioEvent::SetPremium { .. } => "set_premium",
        }
    }
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入情境
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PresenterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析情境
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PresenterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FAVORITES_USER})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn name(&self) -> &str {
        self.scenario
            .as_ref()
            .map(|info| info.name.as_str())
            .unwrap_or("unnamed")
    }

    pub fn settle_rounds(&self) -> usize {
        self.replay.settle_rounds.unwrap_or(DEFAULT_SETTLE_ROUNDS)
    }

    pub fn echo(&self) -> bool {
        self.replay.echo.unwrap_or(false)
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        if let Some(info) = &self.scenario {
            validation::validate_non_empty_string("scenario.name", &info.name)?;
        }

        if let Some(username) = &self.account.username {
            validation::validate_non_empty_string("account.username", username)?;
        }

        if let Some(rounds) = self.replay.settle_rounds {
            validation::validate_range("replay.settle_rounds", rounds, 1, 10_000)?;
        }

        // 回填清單需要可辨識的 id，重複的收藏會讓畫面出現兩列
        let mut seen_ids = HashSet::new();
        for (index, highlight) in self.favorites.iter().enumerate() {
            let field = format!("favorites[{}].id", index);
            validation::validate_non_empty_string(&field, &highlight.id)?;
            if !seen_ids.insert(highlight.id.as_str()) {
                return Err(PresenterError::InvalidConfigValueError {
                    field,
                    value: highlight.id.clone(),
                    reason: "Duplicate favorite id".to_string(),
                });
            }
        }

        let highlights = self
            .favorites
            .iter()
            .enumerate()
            .map(|(index, h)| (format!("favorites[{}]", index), h))
            .chain(self.events.iter().enumerate().filter_map(|(index, event)| {
                event_highlight(event).map(|h| (format!("events[{}].highlight", index), h))
            }));
        for (field, highlight) in highlights {
            if let Some(permalink) = &highlight.permalink {
                validation::validate_url(&format!("{}.permalink", field), permalink)?;
            }
        }

        Ok(())
    }
}

fn event_highlight(event: &ScenarioEvent) -> Option<&Highlight> {
    match event {
        ScenarioEvent::FavoriteClick { highlight }
        | ScenarioEvent::FavoriteDeletion { highlight }
        | ScenarioEvent::OpenHighlight { highlight }
        | ScenarioEvent::OpenSubmission { highlight }
        | ScenarioEvent::ShareHighlight { highlight }
        | ScenarioEvent::NewlyAdded { highlight } => Some(highlight),
        ScenarioEvent::SwishCardExplore { .. }
        | ScenarioEvent::SwishCardGotIt { .. }
        | ScenarioEvent::SetPremium { .. } => None,
    }
}
