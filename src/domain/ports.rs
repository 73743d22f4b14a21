use crate::domain::model::{Highlight, SwishCard};
use crate::utils::error::Result;
use tokio::sync::mpsc::UnboundedReceiver;

/// A hot stream of events. Each call to a stream accessor hands out a fresh
/// subscription; dropping the receiver unsubscribes.
pub type EventStream<T> = UnboundedReceiver<T>;

/// The favorites screen: user-intent streams going out, render commands coming in.
///
/// Commands are synchronous and must not block.
pub trait FavoritesView: Send + Sync {
    fn favorite_clicks(&self) -> EventStream<Highlight>;
    fn favorite_deletions(&self) -> EventStream<Highlight>;
    fn open_highlight_events(&self) -> EventStream<Highlight>;
    fn open_submission_events(&self) -> EventStream<Highlight>;
    fn share_highlight_events(&self) -> EventStream<Highlight>;
    fn swish_card_explore_clicks(&self) -> EventStream<SwishCard>;
    fn swish_card_got_it_clicks(&self) -> EventStream<SwishCard>;

    fn is_premium(&self) -> bool;

    fn show_remove_from_favorites_confirmation(&self, highlight: &Highlight);
    fn remove_highlight(&self, highlight: &Highlight);
    fn open_streamable(&self, shortcode: &str);
    fn open_youtube_video(&self, video_id: &str);
    fn show_error_opening_streamable(&self);
    fn show_error_opening_youtube(&self);
    fn show_unknown_source_error(&self);
    fn show_submission(&self, highlight: &Highlight);
    fn show_share_dialog(&self, highlight: &Highlight);
    fn add_highlight(&self, highlight: &Highlight, add_to_top: bool);
    fn open_premium_activity(&self);
    fn dismiss_swish_card(&self, card: SwishCard);
}

/// Favorites storage.
///
/// Commands are fire-and-forget: they return without blocking, and any
/// background work or retry is owned by the implementation. The returned
/// error is only reported, never acted on.
pub trait FavoritesRepository: Send + Sync {
    /// Existing favorites, delivered in server order.
    fn favorites(&self) -> EventStream<Highlight>;
    /// Favorites added after subscription.
    fn newly_added_favorites(&self) -> EventStream<Highlight>;
    fn remove_from_favorites(&self, highlight: &Highlight) -> Result<()>;
}

pub trait LocalRepository: Send + Sync {
    fn username(&self) -> Option<String>;
    fn mark_swish_card_seen(&self, card: SwishCard) -> Result<()>;
}
