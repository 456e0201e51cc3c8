use preview_core::{FieldView, PreviewState};

const NO_TITLE: &str = "(no title)";
const NO_DESCRIPTION: &str = "(no description)";

pub fn render(view: &FieldView) -> String {
    match &view.preview {
        PreviewState::Idle => match &view.input_error {
            Some(reason) => format!("x {reason}"),
            None => "- waiting for a url".to_string(),
        },
        PreviewState::Pending => format!("... loading preview for {}", view.input.trim()),
        PreviewState::Resolved(record) => {
            let mut lines = vec![
                format!("# {}", record.title.as_deref().unwrap_or(NO_TITLE)),
                format!("  {}", record.description.as_deref().unwrap_or(NO_DESCRIPTION)),
            ];
            if let Some(image) = &record.image {
                lines.push(format!("  image: {image}"));
            }
            lines.push(format!("  {}", record.url));
            lines.join("\n")
        }
        PreviewState::Failed(reason) => format!("! preview failed: {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use preview_core::PreviewRecord;

    use super::*;

    fn view(preview: PreviewState) -> FieldView {
        FieldView {
            field: 1,
            input: "https://example.com ".to_string(),
            generation: 1,
            preview,
            input_error: None,
        }
    }

    #[test]
    fn resolved_preview_shows_placeholders_for_absent_fields() {
        let text = render(&view(PreviewState::Resolved(PreviewRecord::new(
            "https://example.com/",
        ))));
        assert_eq!(
            text,
            "# (no title)\n  (no description)\n  https://example.com/"
        );
    }

    #[test]
    fn resolved_preview_lists_image() {
        let record = PreviewRecord {
            title: Some("Example".to_string()),
            description: Some("Demo page".to_string()),
            image: Some("https://example.com/a.png".to_string()),
            ..PreviewRecord::new("https://example.com/")
        };
        let text = render(&view(PreviewState::Resolved(record)));
        assert!(text.starts_with("# Example\n  Demo page\n  image: https://example.com/a.png"));
    }

    #[test]
    fn pending_and_failed_lines() {
        assert_eq!(
            render(&view(PreviewState::Pending)),
            "... loading preview for https://example.com"
        );
        assert_eq!(
            render(&view(PreviewState::Failed("unreachable: timeout".to_string()))),
            "! preview failed: unreachable: timeout"
        );
    }

    #[test]
    fn idle_shows_rejection_reason() {
        let mut idle = view(PreviewState::Idle);
        assert_eq!(render(&idle), "- waiting for a url");
        idle.input_error = Some("not a valid url: relative URL without a base".to_string());
        assert_eq!(render(&idle), "x not a valid url: relative URL without a base");
    }
}
