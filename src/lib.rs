// Re-export main components
pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod markup;
pub mod render;
pub mod translation;
pub mod truncate;

// Re-export commonly used types
pub use config::RenderConfig;
pub use document::{Partition, SearchDocument, SearchResult, SearchTerms};
pub use error::RenderError;
pub use markup::{Element, Node};
pub use render::{ResultRenderer, TEASER_LENGTH};
pub use translation::{TranslationKey, Translations, Translator};
pub use truncate::{Truncator, WordBoundaryTruncator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
