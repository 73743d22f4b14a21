use anyhow::Result;
use favorites_presenter::utils::validation::Validate;
use favorites_presenter::{ScenarioConfig, ScenarioRunner, SwishCard, ViewCommand};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_scenario(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[tokio::test]
async fn test_replay_scenario_from_file() -> Result<()> {
    let file = write_scenario(
        r#"
[scenario]
name = "evening-session"
description = "Backfill, a push, then some taps"

[account]
username = "Obi-Wan_Ginobili"
premium = true

[replay]
settle_rounds = 32

[[favorites]]
id = "t3_a"
title = "Ginobili eurostep"
url = "https://streamable.com/eurostep"

[[events]]
kind = "newly_added"
highlight = { id = "t3_b", title = "Buzzer beater", url = "https://www.youtube.com/watch?v=buzzer" }

[[events]]
kind = "open_highlight"
highlight = { id = "t3_b", url = "https://www.youtube.com/watch?v=buzzer" }

[[events]]
kind = "favorite_click"
highlight = { id = "t3_a", title = "Ginobili eurostep", url = "https://streamable.com/eurostep" }

[[events]]
kind = "swish_card_explore"
card = "HIGHLIGHT_FAVORITES"

[[events]]
kind = "swish_card_got_it"
card = "HIGHLIGHT_FAVORITES"
"#,
    )?;

    let config = ScenarioConfig::from_file(file.path())?;
    config.validate()?;
    let report = ScenarioRunner::new(config).run().await?;

    assert_eq!(report.scenario, "evening-session");
    assert_eq!(report.username.as_deref(), Some("Obi-Wan_Ginobili"));
    assert!(report.finished_at >= report.started_at);

    let tags: Vec<&str> = report
        .commands
        .iter()
        .map(|command| match command {
            ViewCommand::AddHighlight { add_to_top: false, .. } => "append",
            ViewCommand::AddHighlight { add_to_top: true, .. } => "prepend",
            ViewCommand::OpenYoutubeVideo { .. } => "youtube",
            ViewCommand::ShowRemoveFromFavoritesConfirmation { .. } => "confirm",
            ViewCommand::DismissSwishCard { .. } => "dismiss",
            _ => "other",
        })
        .collect();
    // 付費使用者點擊探索卡片不會產生指令
    assert_eq!(tags, vec!["append", "prepend", "youtube", "confirm", "dismiss"]);

    assert_eq!(report.seen_cards, vec![SwishCard::HighlightFavorites]);
    assert!(report.removed_favorites.is_empty());
    assert_eq!(report.remaining_favorites.len(), 2);
    assert_eq!(report.remaining_favorites[0].id, "t3_b");
    Ok(())
}

#[tokio::test]
async fn test_invalid_scenario_is_rejected_before_replay() -> Result<()> {
    let file = write_scenario(
        r#"
[account]
username = "  "
"#,
    )?;

    let config = ScenarioConfig::from_file(file.path())?;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("account.username"));
    Ok(())
}

#[test]
fn test_missing_scenario_file_is_io_error() {
    let result = ScenarioConfig::from_file("/nonexistent/favorites-scenario.toml");
    assert!(matches!(
        result,
        Err(favorites_presenter::PresenterError::IoError(_))
    ));
}
