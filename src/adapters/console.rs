use crate::core::relay::Relay;
use crate::domain::model::{Highlight, SwishCard};
use crate::domain::ports::{EventStream, FavoritesView};
use crate::utils::lock_unpoisoned;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// A command the presenter issued to the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewCommand {
    ShowRemoveFromFavoritesConfirmation { highlight: Highlight },
    RemoveHighlight { highlight: Highlight },
    OpenStreamable { shortcode: String },
    OpenYoutubeVideo { video_id: String },
    ShowErrorOpeningStreamable,
    ShowErrorOpeningYoutube,
    ShowUnknownSourceError,
    ShowSubmission { highlight: Highlight },
    ShowShareDialog { highlight: Highlight },
    AddHighlight { highlight: Highlight, add_to_top: bool },
    OpenPremiumActivity,
    DismissSwishCard { card: SwishCard },
}

impl ViewCommand {
    pub fn describe(&self) -> String {
        match self {
            ViewCommand::ShowRemoveFromFavoritesConfirmation { highlight } => {
                format!("confirm removal of '{}'", highlight.title)
            }
            ViewCommand::RemoveHighlight { highlight } => format!("remove '{}'", highlight.title),
            ViewCommand::OpenStreamable { shortcode } => format!("open streamable {}", shortcode),
            ViewCommand::OpenYoutubeVideo { video_id } => format!("open youtube {}", video_id),
            ViewCommand::ShowErrorOpeningStreamable => "error: bad streamable link".to_string(),
            ViewCommand::ShowErrorOpeningYoutube => "error: bad youtube link".to_string(),
            ViewCommand::ShowUnknownSourceError => "error: unknown source".to_string(),
            ViewCommand::ShowSubmission { highlight } => {
                format!("show submission for '{}'", highlight.title)
            }
            ViewCommand::ShowShareDialog { highlight } => format!("share '{}'", highlight.title),
            ViewCommand::AddHighlight {
                highlight,
                add_to_top,
            } => format!(
                "add '{}' at {}",
                highlight.title,
                if *add_to_top { "top" } else { "bottom" }
            ),
            ViewCommand::OpenPremiumActivity => "open premium".to_string(),
            ViewCommand::DismissSwishCard { card } => format!("dismiss {}", card),
        }
    }
}

/// User-intent relays backing a view's outbound streams.
#[derive(Default)]
pub struct ViewEvents {
    pub favorite_clicks: Relay<Highlight>,
    pub favorite_deletions: Relay<Highlight>,
    pub open_highlight_events: Relay<Highlight>,
    pub open_submission_events: Relay<Highlight>,
    pub share_highlight_events: Relay<Highlight>,
    pub swish_card_explore_clicks: Relay<SwishCard>,
    pub swish_card_got_it_clicks: Relay<SwishCard>,
}

/// Headless view that records every command and optionally echoes it.
pub struct ConsoleView {
    events: ViewEvents,
    premium: AtomicBool,
    echo: bool,
    commands: Mutex<Vec<ViewCommand>>,
}

impl ConsoleView {
    pub fn new(premium: bool) -> Self {
        Self {
            events: ViewEvents::default(),
            premium: AtomicBool::new(premium),
            echo: false,
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn events(&self) -> &ViewEvents {
        &self.events
    }

    pub fn set_premium(&self, premium: bool) {
        self.premium.store(premium, Ordering::SeqCst);
    }

    pub fn commands(&self) -> Vec<ViewCommand> {
        lock_unpoisoned(&self.commands).clone()
    }

    pub fn take_commands(&self) -> Vec<ViewCommand> {
        std::mem::take(&mut *lock_unpoisoned(&self.commands))
    }

    fn record(&self, command: ViewCommand) {
        tracing::debug!("View command: {:?}", command);
        if self.echo {
            println!("👉 {}", command.describe());
        }
        lock_unpoisoned(&self.commands).push(command);
    }
}

impl FavoritesView for ConsoleView {
    fn favorite_clicks(&self) -> EventStream<Highlight> {
        self.events.favorite_clicks.subscribe()
    }

    fn favorite_deletions(&self) -> EventStream<Highlight> {
        self.events.favorite_deletions.subscribe()
    }

    fn open_highlight_events(&self) -> EventStream<Highlight> {
        self.events.open_highlight_events.subscribe()
    }

    fn open_submission_events(&self) -> EventStream<Highlight> {
        self.events.open_submission_events.subscribe()
    }

    fn share_highlight_events(&self) -> EventStream<Highlight> {
        self.events.share_highlight_events.subscribe()
    }

    fn swish_card_explore_clicks(&self) -> EventStream<SwishCard> {
        self.events.swish_card_explore_clicks.subscribe()
    }

    fn swish_card_got_it_clicks(&self) -> EventStream<SwishCard> {
        self.events.swish_card_got_it_clicks.subscribe()
    }

    fn is_premium(&self) -> bool {
        self.premium.load(Ordering::SeqCst)
    }

    fn show_remove_from_favorites_confirmation(&self, highlight: &Highlight) {
        self.record(ViewCommand::ShowRemoveFromFavoritesConfirmation {
            highlight: highlight.clone(),
        });
    }

    fn remove_highlight(&self, highlight: &Highlight) {
        self.record(ViewCommand::RemoveHighlight {
            highlight: highlight.clone(),
        });
    }

    fn open_streamable(&self, shortcode: &str) {
        self.record(ViewCommand::OpenStreamable {
            shortcode: shortcode.to_string(),
        });
    }

    fn open_youtube_video(&self, video_id: &str) {
        self.record(ViewCommand::OpenYoutubeVideo {
            video_id: video_id.to_string(),
        });
    }

    fn show_error_opening_streamable(&self) {
        self.record(ViewCommand::ShowErrorOpeningStreamable);
    }

    fn show_error_opening_youtube(&self) {
        self.record(ViewCommand::ShowErrorOpeningYoutube);
    }

    fn show_unknown_source_error(&self) {
        self.record(ViewCommand::ShowUnknownSourceError);
    }

    fn show_submission(&self, highlight: &Highlight) {
        self.record(ViewCommand::ShowSubmission {
            highlight: highlight.clone(),
        });
    }

    fn show_share_dialog(&self, highlight: &Highlight) {
        self.record(ViewCommand::ShowShareDialog {
            highlight: highlight.clone(),
        });
    }

    fn add_highlight(&self, highlight: &Highlight, add_to_top: bool) {
        self.record(ViewCommand::AddHighlight {
            highlight: highlight.clone(),
            add_to_top,
        });
    }

    fn open_premium_activity(&self) {
        self.record(ViewCommand::OpenPremiumActivity);
    }

    fn dismiss_swish_card(&self, card: SwishCard) {
        self.record(ViewCommand::DismissSwishCard { card });
    }
}
