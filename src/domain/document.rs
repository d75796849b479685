use std::fmt;
use std::path::PathBuf;

use reqwest::Url;

use super::chunk::DocumentId;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub source: DocumentSource,
    pub size_bytes: u64,
}

/// Where a document's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Url(Url),
    Path(PathBuf),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DocumentSourceError {
    #[error("invalid document url: {0}")]
    InvalidUrl(String),
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),
}

impl DocumentSource {
    /// Parses a remote document location. Only `http` and `https` are accepted.
    pub fn from_url(raw: &str) -> Result<Self, DocumentSourceError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| DocumentSourceError::InvalidUrl(format!("{raw}: {e}")))?;

        match url.scheme() {
            "http" | "https" => Ok(Self::Url(url)),
            other => Err(DocumentSourceError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Command-line form: anything that is not an http(s) url is a file path.
    pub fn from_cli_arg(raw: &str) -> Self {
        Self::from_url(raw).unwrap_or_else(|_| Self::Path(PathBuf::from(raw)))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => {
                // Signed blob urls carry credentials in the query string.
                let mut shown = url.clone();
                shown.set_query(None);
                write!(f, "{shown}")
            }
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Document {
    pub fn new(source: DocumentSource, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            source,
            size_bytes,
        }
    }
}
