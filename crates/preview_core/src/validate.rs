use std::fmt;

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlRejection {
    #[error("no url entered")]
    Empty,
    #[error("not a valid url: {0}")]
    Malformed(String),
    #[error("unsupported url scheme {0}")]
    UnsupportedScheme(String),
}

/// Absolute http(s) URL that is known to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl ValidatedUrl {
    pub fn parse(text: &str) -> Result<Self, UrlRejection> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(UrlRejection::Empty);
        }
        let url = Url::parse(trimmed).map_err(|err| UrlRejection::Malformed(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(UrlRejection::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
