//! Core domain layer. No external I/O dependencies.
//!
//! Entities, locale bundles and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod locale;

pub use entities::{Badge, Category, ChatMessage, ChatRole, GroundingCitation, NewsItem};
pub use errors::DomainError;
pub use locale::{Language, LocaleBundle, resolve_language};
