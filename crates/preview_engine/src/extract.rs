use scraper::{Html, Selector};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, html: &str) -> PageMetadata;
}

/// Open Graph first, standard tags second:
/// - title: `og:title`, else `<title>`
/// - description: `og:description`, else `<meta name="description">`
/// - image: `og:image` only
///
/// Blank values count as missing so the next source is tried.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenGraphExtractor;

impl MetadataExtractor for OpenGraphExtractor {
    fn extract(&self, html: &str) -> PageMetadata {
        // html5ever never rejects input; broken markup still yields a tree.
        let doc = Html::parse_document(html);

        PageMetadata {
            title: meta_content(&doc, "property", "og:title").or_else(|| title_text(&doc)),
            description: meta_content(&doc, "property", "og:description")
                .or_else(|| meta_content(&doc, "name", "description")),
            image: meta_content(&doc, "property", "og:image"),
        }
    }
}

fn meta_content(doc: &Html, attr: &str, key: &str) -> Option<String> {
    let selector = Selector::parse("meta").ok()?;
    doc.select(&selector)
        .filter(|meta| {
            meta.value()
                .attr(attr)
                .is_some_and(|value| value.trim().eq_ignore_ascii_case(key))
        })
        .find_map(|meta| meta.value().attr("content").and_then(non_blank))
}

fn title_text(doc: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let title = doc.select(&selector).next()?;
    let text = title.text().collect::<String>();
    non_blank(&text.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> PageMetadata {
        OpenGraphExtractor.extract(html)
    }

    #[test]
    fn open_graph_title_wins_over_title_tag() {
        let meta = extract(
            r#"<html><head><title>B</title><meta property="og:title" content="A"></head></html>"#,
        );
        assert_eq!(meta.title.as_deref(), Some("A"));
    }

    #[test]
    fn title_tag_used_without_open_graph() {
        let meta = extract("<html><head><title>\n  B  page\n</title></head><body></body></html>");
        assert_eq!(meta.title.as_deref(), Some("B page"));
    }

    #[test]
    fn blank_open_graph_title_falls_back() {
        let meta = extract(
            r#"<head><meta property="og:title" content="  "><title>Fallback</title></head>"#,
        );
        assert_eq!(meta.title.as_deref(), Some("Fallback"));
    }

    #[test]
    fn description_prefers_open_graph_then_standard() {
        let both = extract(
            r#"<head><meta name="description" content="plain"><meta property="og:description" content="rich"></head>"#,
        );
        assert_eq!(both.description.as_deref(), Some("rich"));

        let plain = extract(r#"<head><meta name="description" content="plain"></head>"#);
        assert_eq!(plain.description.as_deref(), Some("plain"));
    }

    #[test]
    fn missing_metadata_is_absent_not_empty() {
        let meta = extract("<html><head></head><body><p>hi</p></body></html>");
        assert_eq!(meta, PageMetadata::default());
    }

    #[test]
    fn image_has_no_fallback() {
        let meta = extract(
            r#"<head><meta name="image" content="/x.png"><link rel="icon" href="/fav.ico"></head><body><img src="/y.png"></body>"#,
        );
        assert_eq!(meta.image, None);

        let meta = extract(r#"<meta property="og:image" content="https://cdn.test/p.png">"#);
        assert_eq!(meta.image.as_deref(), Some("https://cdn.test/p.png"));
    }

    #[test]
    fn malformed_markup_still_yields_metadata() {
        let meta = extract(
            r#"<html><head><title>Broken<meta property="og:description" content="still here"<body><div><p>unclosed"#,
        );
        // The unterminated title swallows the rest as text; what matters is a result, not a panic.
        assert!(meta.title.is_some());

        let meta = extract(r#"<meta property="og:title" content="Loose"><div><span></div></p>"#);
        assert_eq!(meta.title.as_deref(), Some("Loose"));
    }

    #[test]
    fn entities_in_attributes_are_decoded() {
        let meta = extract(r#"<meta property="og:title" content="Fish &amp; Chips">"#);
        assert_eq!(meta.title.as_deref(), Some("Fish & Chips"));
    }
}
