//! Application use cases. Orchestrate domain logic via ports.

pub mod app;
pub mod chat_service;
pub mod export_service;
pub mod news_service;
pub mod prompts;
pub mod state;

pub use app::NewsDesk;
pub use chat_service::ChatService;
pub use export_service::ExportService;
pub use news_service::NewsService;
pub use state::{Action, AppState};
