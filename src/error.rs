use thiserror::Error;

/// Errors raised while turning a search result into markup
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    /// No document in the result has a bare (anchor-free) location
    #[error("malformed result set: none of the {count} documents is an article")]
    MissingArticle { count: usize },

    /// More than one document claims to be the article
    #[error("malformed result set: {count} article documents, expected exactly one ({locations})")]
    MultipleArticles { count: usize, locations: String },
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;
