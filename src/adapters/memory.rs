use crate::core::relay::Relay;
use crate::domain::model::{Highlight, SwishCard};
use crate::domain::ports::{EventStream, FavoritesRepository, LocalRepository};
use crate::utils::error::{PresenterError, Result};
use crate::utils::lock_unpoisoned;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Favorites kept in memory. New subscribers to [`FavoritesRepository::favorites`]
/// first receive the stored set, then any favorite added through
/// [`InMemoryFavoritesRepository::push_existing`].
#[derive(Default)]
pub struct InMemoryFavoritesRepository {
    stored: Mutex<Vec<Highlight>>,
    removed: Mutex<Vec<Highlight>>,
    existing: Relay<Highlight>,
    newly_added: Relay<Highlight>,
    fail_removals: AtomicBool,
}

impl InMemoryFavoritesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_favorites(favorites: Vec<Highlight>) -> Self {
        let repository = Self::default();
        *lock_unpoisoned(&repository.stored) = favorites;
        repository
    }

    /// Append to the stored set and emit on the backfill stream.
    pub fn push_existing(&self, highlight: Highlight) {
        let mut stored = lock_unpoisoned(&self.stored);
        stored.push(highlight.clone());
        self.existing.accept(highlight);
    }

    /// Prepend to the stored set and emit on the incremental stream.
    pub fn push_new(&self, highlight: Highlight) {
        lock_unpoisoned(&self.stored).insert(0, highlight.clone());
        self.newly_added.accept(highlight);
    }

    pub fn stored(&self) -> Vec<Highlight> {
        lock_unpoisoned(&self.stored).clone()
    }

    pub fn removed(&self) -> Vec<Highlight> {
        lock_unpoisoned(&self.removed).clone()
    }

    /// 模擬後端失敗，用於驗證 presenter 不會重試
    pub fn set_fail_removals(&self, fail: bool) {
        self.fail_removals.store(fail, Ordering::SeqCst);
    }
}

impl FavoritesRepository for InMemoryFavoritesRepository {
    fn favorites(&self) -> EventStream<Highlight> {
        // 持有 stored 鎖直到訂閱完成，避免與 push_existing 交錯而漏掉項目
        let stored = lock_unpoisoned(&self.stored);
        let stream = self.existing.subscribe_with(stored.iter().cloned());
        stream
    }

    fn newly_added_favorites(&self) -> EventStream<Highlight> {
        self.newly_added.subscribe()
    }

    fn remove_from_favorites(&self, highlight: &Highlight) -> Result<()> {
        lock_unpoisoned(&self.removed).push(highlight.clone());

        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(PresenterError::repository(format!(
                "favorites backend rejected removal of '{}'",
                highlight.id
            )));
        }

        lock_unpoisoned(&self.stored).retain(|stored| stored != highlight);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryLocalRepository {
    username: Mutex<Option<String>>,
    seen_cards: Mutex<BTreeSet<SwishCard>>,
}

impl InMemoryLocalRepository {
    pub fn new(username: Option<String>) -> Self {
        Self {
            username: Mutex::new(username),
            seen_cards: Mutex::new(BTreeSet::new()),
        }
    }

    pub fn is_seen(&self, card: SwishCard) -> bool {
        lock_unpoisoned(&self.seen_cards).contains(&card)
    }

    pub fn seen_cards(&self) -> Vec<SwishCard> {
        lock_unpoisoned(&self.seen_cards).iter().copied().collect()
    }
}

impl LocalRepository for InMemoryLocalRepository {
    fn username(&self) -> Option<String> {
        lock_unpoisoned(&self.username).clone()
    }

    fn mark_swish_card_seen(&self, card: SwishCard) -> Result<()> {
        lock_unpoisoned(&self.seen_cards).insert(card);
        Ok(())
    }
}
