//! Preview engine: page fetching, metadata extraction and effect execution.
mod client;
mod decode;
mod engine;
mod extract;
mod fetch;
mod source;
mod types;

pub use client::{ClientSetupError, HttpPreviewClient};
pub use decode::{decode_html, CharsetSource, DecodeError, DecodedHtml};
pub use engine::{EngineEvents, EngineHandle};
pub use extract::{MetadataExtractor, OpenGraphExtractor, PageMetadata};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use source::{is_markup_content_type, PageExtractor, PreviewSource};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput};
