pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ConsoleView, InMemoryFavoritesRepository, InMemoryLocalRepository, ViewCommand};
pub use app::{ReplayReport, ScenarioRunner};
pub use config::{ScenarioConfig, ScenarioEvent};
pub use crate::core::{classifier::classify, presenter::FavoritesPresenter, relay::Relay};
pub use domain::model::{Classification, Highlight, HighlightSource, SourceError, SwishCard};
pub use domain::ports::{EventStream, FavoritesRepository, FavoritesView, LocalRepository};
pub use utils::error::{PresenterError, Result};
