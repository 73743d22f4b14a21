// Adapters layer: concrete implementations of the view and repository ports.

pub mod console;
pub mod memory;

pub use console::{ConsoleView, ViewCommand, ViewEvents};
pub use memory::{InMemoryFavoritesRepository, InMemoryLocalRepository};
