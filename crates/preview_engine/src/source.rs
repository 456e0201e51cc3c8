use preview_core::{ExtractionError, PreviewRecord};
use preview_logging::{preview_debug, preview_warn};

use crate::{
    decode_html, FetchSettings, Fetcher, MetadataExtractor, OpenGraphExtractor, ReqwestFetcher,
};

/// Anything that can turn a URL into a preview record.
#[async_trait::async_trait]
pub trait PreviewSource: Send + Sync {
    async fn preview(&self, url: &str) -> Result<PreviewRecord, ExtractionError>;
}

/// In-process extractor: fetch, decode, parse, pick metadata.
pub struct PageExtractor {
    fetcher: Box<dyn Fetcher>,
    metadata: Box<dyn MetadataExtractor>,
}

impl PageExtractor {
    pub fn new(settings: FetchSettings) -> Self {
        Self::with_parts(ReqwestFetcher::new(settings), OpenGraphExtractor)
    }

    pub fn with_parts(
        fetcher: impl Fetcher + 'static,
        metadata: impl MetadataExtractor + 'static,
    ) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            metadata: Box::new(metadata),
        }
    }

    pub async fn extract(&self, url: &str) -> Result<PreviewRecord, ExtractionError> {
        let output = self.fetcher.fetch(url).await.map_err(|err| {
            preview_warn!("fetch of {} failed: {}", url, err);
            ExtractionError::from(err)
        })?;

        let content_type = output.metadata.content_type.as_deref();
        if let Some(ct) = content_type {
            if !is_markup_content_type(ct) {
                return Err(ExtractionError::ParseFailure(format!(
                    "content type {ct} is not markup"
                )));
            }
        }

        let decoded = decode_html(&output.bytes, content_type)
            .map_err(|err| ExtractionError::Unreachable(err.to_string()))?;
        preview_debug!(
            "decoded {} as {} ({:?})",
            output.metadata.final_url,
            decoded.encoding_label,
            decoded.source
        );

        let page = self.metadata.extract(&decoded.html);
        Ok(PreviewRecord {
            url: output.metadata.final_url,
            title: page.title,
            description: page.description,
            image: page.image,
        })
    }
}

#[async_trait::async_trait]
impl PreviewSource for PageExtractor {
    async fn preview(&self, url: &str) -> Result<PreviewRecord, ExtractionError> {
        self.extract(url).await
    }
}

/// Whether a declared content type can hold HTML-like markup.
pub fn is_markup_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase();
    essence.is_empty()
        || essence.starts_with("text/")
        || essence.contains("html")
        || essence.ends_with("/xml")
        || essence.ends_with("+xml")
}

#[cfg(test)]
mod tests {
    use super::is_markup_content_type;

    #[test]
    fn markup_content_types() {
        assert!(is_markup_content_type("text/html; charset=utf-8"));
        assert!(is_markup_content_type("TEXT/PLAIN"));
        assert!(is_markup_content_type("application/xhtml+xml"));
        assert!(is_markup_content_type("application/xml"));
        assert!(is_markup_content_type(""));
        assert!(!is_markup_content_type("image/png"));
        assert!(!is_markup_content_type("application/octet-stream"));
        assert!(!is_markup_content_type("application/json"));
    }
}
