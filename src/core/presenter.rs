use crate::core::classifier::classify;
use crate::core::subscriptions::Subscriptions;
use crate::domain::model::{Classification, Highlight, SourceError, SwishCard};
use crate::domain::ports::{FavoritesRepository, FavoritesView, LocalRepository};
use crate::utils::error::{PresenterError, Result};
use std::sync::Arc;

/// Coordinates the favorites view with the favorites and local repositories.
///
/// The presenter is either detached (no subscriptions) or attached to exactly
/// one view. While attached it reacts to nine independent streams; see
/// [`FavoritesPresenter::attach_view`].
pub struct FavoritesPresenter<L: LocalRepository, F: FavoritesRepository> {
    local_repository: Arc<L>,
    favorites_repository: Arc<F>,
    subscriptions: Option<Subscriptions>,
}

impl<L, F> FavoritesPresenter<L, F>
where
    L: LocalRepository + 'static,
    F: FavoritesRepository + 'static,
{
    pub fn new(local_repository: Arc<L>, favorites_repository: Arc<F>) -> Self {
        Self {
            local_repository,
            favorites_repository,
            subscriptions: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscriptions.is_some()
    }

    /// Subscribe to every view and repository stream.
    ///
    /// Must be called from within a tokio runtime. Attaching twice without a
    /// detach in between is rejected so no handler is registered twice.
    pub fn attach_view<V>(&mut self, view: Arc<V>) -> Result<()>
    where
        V: FavoritesView + 'static,
    {
        if self.is_attached() {
            return Err(PresenterError::AlreadyAttached);
        }

        let mut subscriptions = Subscriptions::open()?;
        let reactions = Reactions {
            view: Arc::clone(&view),
            local_repository: Arc::clone(&self.local_repository),
            favorites_repository: Arc::clone(&self.favorites_repository),
        };

        let r = reactions.clone();
        subscriptions.subscribe("favorite_clicks", view.favorite_clicks(), move |h| {
            r.on_favorite_click(h)
        });
        let r = reactions.clone();
        subscriptions.subscribe("favorite_deletions", view.favorite_deletions(), move |h| {
            r.on_favorite_deletion(h)
        });
        let r = reactions.clone();
        subscriptions.subscribe("open_highlight_events", view.open_highlight_events(), move |h| {
            r.on_open_highlight(h)
        });
        let r = reactions.clone();
        subscriptions.subscribe("open_submission_events", view.open_submission_events(), move |h| {
            r.on_open_submission(h)
        });
        let r = reactions.clone();
        subscriptions.subscribe("share_highlight_events", view.share_highlight_events(), move |h| {
            r.on_share_highlight(h)
        });
        let r = reactions.clone();
        subscriptions.subscribe("favorites", self.favorites_repository.favorites(), move |h| {
            r.on_existing_favorite(h)
        });
        let r = reactions.clone();
        subscriptions.subscribe(
            "newly_added_favorites",
            self.favorites_repository.newly_added_favorites(),
            move |h| r.on_newly_added_favorite(h),
        );
        let r = reactions.clone();
        subscriptions.subscribe(
            "swish_card_explore_clicks",
            view.swish_card_explore_clicks(),
            move |card| r.on_swish_card_explore(card),
        );
        let r = reactions;
        subscriptions.subscribe(
            "swish_card_got_it_clicks",
            view.swish_card_got_it_clicks(),
            move |card| r.on_swish_card_got_it(card),
        );

        tracing::info!(
            "Favorites view attached ({} subscriptions, user: {})",
            subscriptions.len(),
            self.local_repository.username().as_deref().unwrap_or("<anonymous>")
        );
        self.subscriptions = Some(subscriptions);
        Ok(())
    }

    /// Dispose every subscription. No view or repository command is issued
    /// after this returns. Detaching while detached is a no-op.
    pub async fn detach_view(&mut self) {
        if let Some(mut subscriptions) = self.subscriptions.take() {
            subscriptions.dispose().await;
            tracing::info!("Favorites view detached");
        }
    }
}

/// Per-event decision logic, shared by all subscription handlers of one
/// attach cycle.
struct Reactions<V, L, F> {
    view: Arc<V>,
    local_repository: Arc<L>,
    favorites_repository: Arc<F>,
}

impl<V, L, F> Clone for Reactions<V, L, F> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            local_repository: Arc::clone(&self.local_repository),
            favorites_repository: Arc::clone(&self.favorites_repository),
        }
    }
}

impl<V, L, F> Reactions<V, L, F>
where
    V: FavoritesView + 'static,
    L: LocalRepository + 'static,
    F: FavoritesRepository + 'static,
{
    fn on_favorite_click(&self, highlight: Highlight) {
        tracing::debug!("Favorite clicked: {}", highlight.id);
        self.view.show_remove_from_favorites_confirmation(&highlight);
    }

    fn on_favorite_deletion(&self, highlight: Highlight) {
        self.view.remove_highlight(&highlight);

        // 在 handler 內送出，detach 回傳後不會再有 repository 指令；不重試
        match self.favorites_repository.remove_from_favorites(&highlight) {
            Ok(()) => tracing::debug!(
                "Removed favorite {} for {}",
                highlight.id,
                self.local_repository.username().as_deref().unwrap_or("<anonymous>")
            ),
            Err(e) => tracing::warn!("⚠️ Failed to remove favorite {}: {}", highlight.id, e),
        }
    }

    fn on_open_highlight(&self, highlight: Highlight) {
        match classify(&highlight.url) {
            Classification::Streamable { shortcode } => self.view.open_streamable(&shortcode),
            Classification::Youtube { video_id } => self.view.open_youtube_video(&video_id),
            Classification::Failed { error, .. } => {
                tracing::warn!("Cannot open highlight '{}': {:?}", highlight.url, error);
                match error {
                    SourceError::MalformedStreamableUrl => self.view.show_error_opening_streamable(),
                    SourceError::MalformedYoutubeUrl => self.view.show_error_opening_youtube(),
                    SourceError::UnknownSource => self.view.show_unknown_source_error(),
                }
            }
        }
    }

    fn on_open_submission(&self, highlight: Highlight) {
        self.view.show_submission(&highlight);
    }

    fn on_share_highlight(&self, highlight: Highlight) {
        self.view.show_share_dialog(&highlight);
    }

    fn on_existing_favorite(&self, highlight: Highlight) {
        self.view.add_highlight(&highlight, false);
    }

    fn on_newly_added_favorite(&self, highlight: Highlight) {
        tracing::debug!("New favorite pushed: {}", highlight.id);
        self.view.add_highlight(&highlight, true);
    }

    fn on_swish_card_explore(&self, card: SwishCard) {
        // 每次都重新讀取，使用者可能在 attach 之後升級
        if self.view.is_premium() {
            tracing::debug!("Ignoring explore click on {} for premium user", card);
            return;
        }
        self.view.open_premium_activity();
    }

    fn on_swish_card_got_it(&self, card: SwishCard) {
        self.view.dismiss_swish_card(card);

        if let Err(e) = self.local_repository.mark_swish_card_seen(card) {
            tracing::warn!("⚠️ Failed to mark {} as seen: {}", card, e);
        }
    }
}
