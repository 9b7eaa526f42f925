pub mod action;
pub mod config;
pub mod controller;
pub mod dismissal;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod gateway;
pub mod input;
pub mod paths;
pub mod photo;
pub mod session;
pub mod store;
pub mod suggestions;

// Re-export commonly used types at crate root
pub use action::Action;
pub use config::Config;
pub use controller::{Mode, QueryController, ViewModel};
pub use dispatch::{FetchDispatcher, FetchRequest, FetchTarget};
pub use error::FetchError;
pub use event::AppEvent;
pub use gateway::{FlickrGateway, PhotoGateway};
pub use photo::{PhotoRecord, PhotoSize};
pub use session::{Applied, Generation, SearchSession};
pub use suggestions::{SuggestionStore, Suggestions};
