#![allow(dead_code)]

use favorites_presenter::{
    ConsoleView, FavoritesPresenter, Highlight, InMemoryFavoritesRepository, InMemoryLocalRepository,
};
use std::sync::Arc;

pub const USERNAME: &str = "Obi-Wan_Ginobili";

pub struct Harness {
    pub view: Arc<ConsoleView>,
    pub favorites: Arc<InMemoryFavoritesRepository>,
    pub local: Arc<InMemoryLocalRepository>,
    pub presenter: FavoritesPresenter<InMemoryLocalRepository, InMemoryFavoritesRepository>,
}

impl Harness {
    pub fn new(premium: bool) -> Self {
        Self::with_favorites(premium, Vec::new())
    }

    pub fn with_favorites(premium: bool, favorites: Vec<Highlight>) -> Self {
        let view = Arc::new(ConsoleView::new(premium));
        let favorites = Arc::new(InMemoryFavoritesRepository::with_favorites(favorites));
        let local = Arc::new(InMemoryLocalRepository::new(Some(USERNAME.to_string())));
        let presenter = FavoritesPresenter::new(Arc::clone(&local), Arc::clone(&favorites));
        Self {
            view,
            favorites,
            local,
            presenter,
        }
    }

    /// Must be called inside a tokio runtime.
    pub fn attached(premium: bool) -> Self {
        let mut harness = Self::new(premium);
        harness.attach();
        harness
    }

    pub fn attach(&mut self) {
        self.presenter
            .attach_view(Arc::clone(&self.view))
            .expect("attach inside runtime");
    }
}

pub fn highlight(id: &str, url: &str) -> Highlight {
    Highlight {
        id: id.to_string(),
        title: format!("Highlight {}", id),
        url: url.to_string(),
        ..Highlight::default()
    }
}

/// Yield until the presenter's subscription tasks have run.
/// Tests use the default current-thread runtime, so this is deterministic.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
