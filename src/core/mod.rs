pub mod classifier;
pub mod presenter;
pub mod relay;
pub mod subscriptions;

pub use crate::domain::model::{Classification, Highlight, HighlightSource, SourceError, SwishCard};
pub use crate::domain::ports::{EventStream, FavoritesRepository, FavoritesView, LocalRepository};
pub use crate::utils::error::Result;
