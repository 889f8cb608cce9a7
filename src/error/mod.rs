//! Error type shared by the renderers, the dashboard, and the site store

use std::path::PathBuf;

/// Failures that can't be degraded into an empty substitution. Missing pages,
/// redirects, and translations are not errors; these are problems with the
/// collaborators themselves.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("repository failure: {0}")]
    Repository(String),

    #[error("unable to render template {name}: {source}")]
    Template {
        name: String,
        #[source]
        source: tinytemplate::error::Error,
    },

    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid site file {}: {source}", path.display())]
    Site {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("unable to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
