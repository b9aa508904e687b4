//! Source acquisition: turning a [`DataSource`] into raw text.
//!
//! This is the only place the crate performs I/O. Everything downstream consumes the returned
//! string.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DeckError, DeckResult};

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A local file.
    Path(PathBuf),
    /// An HTTP(S) URL fetched with a GET request (requires the `http` feature).
    Url(String),
    /// Text already in memory (e.g. pasted by the user). `name` is only used for format inference
    /// and log messages.
    Inline { name: String, text: String },
}

impl DataSource {
    /// Classify a user-supplied location: `http://`/`https://` prefixes are URLs, anything else is a
    /// file path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    /// File extension of the path/URL/inline name, lowercased, if any.
    ///
    /// For URLs the query string and fragment are ignored.
    pub fn extension(&self) -> Option<String> {
        let name = match self {
            Self::Path(p) => return extension_of(p),
            Self::Url(url) => url.split(['?', '#']).next().unwrap_or(url),
            Self::Inline { name, .. } => name.as_str(),
        };
        let last_segment = name.rsplit('/').next().unwrap_or(name);
        extension_of(Path::new(last_segment))
    }

    /// Read the source to a string.
    pub fn read_text(&self) -> DeckResult<String> {
        match self {
            Self::Path(p) => Ok(fs::read_to_string(p)?),
            Self::Url(url) => fetch_url(url),
            Self::Inline { text, .. } => Ok(text.clone()),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(url) => write!(f, "{url}"),
            Self::Inline { name, .. } => write!(f, "inline:{name}"),
        }
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

#[cfg(feature = "http")]
fn fetch_url(url: &str) -> DeckResult<String> {
    let http_error = |e: reqwest::Error| DeckError::Http {
        url: url.to_string(),
        message: e.to_string(),
    };

    log::debug!("fetching dataset from {url}");
    let response = reqwest::blocking::get(url).map_err(http_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(DeckError::Http {
            url: url.to_string(),
            message: format!("server answered {status}"),
        });
    }
    response.text().map_err(http_error)
}

#[cfg(not(feature = "http"))]
fn fetch_url(url: &str) -> DeckResult<String> {
    Err(DeckError::UnsupportedSource {
        message: format!("cannot fetch '{url}': http support not enabled (enable cargo feature 'http')"),
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::DataSource;

    #[test]
    fn parse_classifies_urls_and_paths() {
        assert_eq!(
            DataSource::parse(" https://example.com/data.csv "),
            DataSource::Url("https://example.com/data.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("data/events.json"),
            DataSource::Path(PathBuf::from("data/events.json"))
        );
    }

    #[test]
    fn extension_ignores_query_and_fragment() {
        let src = DataSource::Url("https://example.com/export.JSON?token=abc#top".to_string());
        assert_eq!(src.extension().as_deref(), Some("json"));

        let bare = DataSource::Url("https://example.com/".to_string());
        assert_eq!(bare.extension(), None);
    }

    #[test]
    fn inline_sources_read_back_their_text() {
        let src = DataSource::Inline {
            name: "paste.csv".to_string(),
            text: "a\n1\n".to_string(),
        };
        assert_eq!(src.read_text().unwrap(), "a\n1\n");
        assert_eq!(src.extension().as_deref(), Some("csv"));
        assert_eq!(src.to_string(), "inline:paste.csv");
    }
}
