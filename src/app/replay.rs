use crate::adapters::{ConsoleView, InMemoryFavoritesRepository, InMemoryLocalRepository, ViewCommand};
use crate::config::scenario::{ScenarioConfig, ScenarioEvent};
use crate::core::presenter::FavoritesPresenter;
use crate::domain::model::{Highlight, SwishCard};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of one replayed session.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub scenario: String,
    pub username: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub events_replayed: usize,
    pub commands: Vec<ViewCommand>,
    pub removed_favorites: Vec<Highlight>,
    pub remaining_favorites: Vec<Highlight>,
    pub seen_cards: Vec<SwishCard>,
}

impl ReplayReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Drives a [`FavoritesPresenter`] through a scripted session using the
/// console view and in-memory repositories.
pub struct ScenarioRunner {
    config: ScenarioConfig,
}

impl ScenarioRunner {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// Replay the scenario. Run it on a current-thread runtime: settling
    /// relies on yielding to the presenter's subscription tasks.
    pub async fn run(&self) -> Result<ReplayReport> {
        let started_at = Utc::now();
        let rounds = self.config.settle_rounds();

        let view = Arc::new(ConsoleView::new(self.config.account.premium).with_echo(self.config.echo()));
        let favorites = Arc::new(InMemoryFavoritesRepository::with_favorites(
            self.config.favorites.clone(),
        ));
        let local = Arc::new(InMemoryLocalRepository::new(self.config.account.username.clone()));

        tracing::info!(
            "🚀 Replaying scenario '{}' ({} favorites, {} events)",
            self.config.name(),
            self.config.favorites.len(),
            self.config.events.len()
        );

        let mut presenter = FavoritesPresenter::new(Arc::clone(&local), Arc::clone(&favorites));
        presenter.attach_view(Arc::clone(&view))?;
        settle(rounds).await;

        for (index, event) in self.config.events.iter().enumerate() {
            tracing::debug!("Event #{}: {}", index, event.kind());
            dispatch(event, &view, &favorites);
            settle(rounds).await;
        }

        presenter.detach_view().await;

        let report = ReplayReport {
            scenario: self.config.name().to_string(),
            username: self.config.account.username.clone(),
            started_at,
            finished_at: Utc::now(),
            events_replayed: self.config.events.len(),
            commands: view.commands(),
            removed_favorites: favorites.removed(),
            remaining_favorites: favorites.stored(),
            seen_cards: local.seen_cards(),
        };

        tracing::info!(
            "✅ Scenario '{}' issued {} view commands",
            report.scenario,
            report.commands.len()
        );
        Ok(report)
    }
}

fn dispatch(event: &ScenarioEvent, view: &ConsoleView, favorites: &InMemoryFavoritesRepository) {
    let events = view.events();
    let delivered = match event.clone() {
        ScenarioEvent::FavoriteClick { highlight } => events.favorite_clicks.accept(highlight),
        ScenarioEvent::FavoriteDeletion { highlight } => events.favorite_deletions.accept(highlight),
        ScenarioEvent::OpenHighlight { highlight } => events.open_highlight_events.accept(highlight),
        ScenarioEvent::OpenSubmission { highlight } => events.open_submission_events.accept(highlight),
        ScenarioEvent::ShareHighlight { highlight } => events.share_highlight_events.accept(highlight),
        ScenarioEvent::SwishCardExplore { card } => events.swish_card_explore_clicks.accept(card),
        ScenarioEvent::SwishCardGotIt { card } => events.swish_card_got_it_clicks.accept(card),
        ScenarioEvent::NewlyAdded { highlight } => {
            favorites.push_new(highlight);
            return;
        }
        ScenarioEvent::SetPremium { premium } => {
            view.set_premium(premium);
            return;
        }
    };

    if delivered == 0 {
        tracing::warn!("No subscriber received '{}' event", event.kind());
    }
}

/// 讓出執行權，讓 presenter 的訂閱任務跑完
async fn settle(rounds: usize) {
    for _ in 0..rounds {
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: &str = r#"
[scenario]
name = "session"

[account]
username = "Obi-Wan_Ginobili"
premium = false

[[favorites]]
id = "1"
title = "Poster dunk"
url = "streamable.com/abcd"

[[favorites]]
id = "2"
title = "Game winner"
url = "youtube.com?v=efgh"

[[events]]
kind = "open_highlight"
highlight = { id = "2", url = "youtube.com?v=efgh" }

[[events]]
kind = "favorite_deletion"
highlight = { id = "1", title = "Poster dunk", url = "streamable.com/abcd" }

[[events]]
kind = "swish_card_explore"
card = "HIGHLIGHT_FAVORITES"

[[events]]
kind = "set_premium"
premium = true

[[events]]
kind = "swish_card_explore"
card = "HIGHLIGHT_FAVORITES"

[[events]]
kind = "swish_card_got_it"
card = "HIGHLIGHT_FAVORITES"
"#;

    #[tokio::test]
    async fn test_replay_session() {
        let config = ScenarioConfig::from_toml_str(SESSION).unwrap();
        let report = ScenarioRunner::new(config).run().await.unwrap();

        let deleted = Highlight {
            id: "1".to_string(),
            title: "Poster dunk".to_string(),
            url: "streamable.com/abcd".to_string(),
            ..Highlight::default()
        };

        assert_eq!(report.events_replayed, 6);
        assert_eq!(
            &report.commands[2..],
            &[
                ViewCommand::OpenYoutubeVideo {
                    video_id: "efgh".to_string()
                },
                ViewCommand::RemoveHighlight {
                    highlight: deleted.clone()
                },
                ViewCommand::OpenPremiumActivity,
                ViewCommand::DismissSwishCard {
                    card: SwishCard::HighlightFavorites
                },
            ]
        );
        assert!(matches!(
            report.commands[0],
            ViewCommand::AddHighlight { add_to_top: false, .. }
        ));
        assert_eq!(report.removed_favorites, vec![deleted]);
        assert_eq!(report.remaining_favorites.len(), 1);
        assert_eq!(report.seen_cards, vec![SwishCard::HighlightFavorites]);
    }

    #[tokio::test]
    async fn test_report_serializes_to_json() {
        let config = ScenarioConfig::from_toml_str(
            r#"
[[events]]
kind = "open_highlight"
highlight = { url = "instagram.com?v=50" }
"#,
        )
        .unwrap();
        let report = ScenarioRunner::new(config).run().await.unwrap();

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["scenario"], "unnamed");
        assert_eq!(json["commands"][0]["command"], "show_unknown_source_error");
    }
}
