//! Parse Tika's XHTML output into a changes record

use crate::error::ExtractionError;
use crate::types::{Changes, DOCUMENT_TYPE};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Everything between the first `<body>` and the last `</body>`.
static BODY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<body>(.+)</body>").unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<.*?>").unwrap());

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\n\t ])[\n\t ]+").unwrap());

static CONTENT_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)name="Content-Type" content="([^"]+)"/>"#).unwrap());

/// Populate `changes` from the engine's output.
///
/// `warning` is the stderr that accompanied the output. When no body can be
/// found it is taken to be the reason, and becomes the error.
pub fn interpret(warning: &str, raw_output: &str, changes: &mut Changes) -> Result<(), ExtractionError> {
    if raw_output.is_empty() {
        return Err(ExtractionError::NoData);
    }

    // Encoding mismatches in the engine leave replacement characters behind.
    let data = raw_output.replace('\u{FFFD}', "");

    match BODY_RE.captures(&data).and_then(|c| c.get(1)) {
        // Non-text files (pictures) legitimately have no body.
        None if !warning.is_empty() => return Err(ExtractionError::Warning(warning.to_string())),
        None => debug!("No body found in extraction output"),
        Some(body) => apply_body(body.as_str(), changes),
    }

    if let Some(content_type) = CONTENT_TYPE_RE.captures(&data).and_then(|c| c.get(1)) {
        changes.data.content_type = Some(content_type.as_str().to_string());
    }

    Ok(())
}

fn apply_body(html: &str, changes: &mut Changes) {
    let text = html_to_text(html);

    if text.trim().is_empty() {
        debug!("Body has no textual content");
        changes.metadata.text = None;
        changes.data.html = None;
        return;
    }

    changes.data.html = Some(html.to_string());
    changes.metadata.text = Some(text);
    changes.document_type = Some(DOCUMENT_TYPE.to_string());
}

/// Derive sanitized plain text from an HTML fragment.
///
/// Entities are decoded before angle brackets are escaped, so the result
/// never contains a raw `<` or `>` even when the source encoded one.
pub fn html_to_text(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, "");
    let collapsed = WHITESPACE_RUN_RE.replace_all(&stripped, "$1");
    let decoded = html_escape::decode_html_entities(&collapsed);

    decoded.replace('>', "&gt;").replace('<', "&lt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret_fresh(warning: &str, raw_output: &str) -> Result<Changes, ExtractionError> {
        let mut changes = Changes::new();
        interpret(warning, raw_output, &mut changes)?;
        Ok(changes)
    }

    #[test]
    fn test_empty_output_is_no_data() {
        let result = interpret_fresh("", "");
        assert!(matches!(result, Err(ExtractionError::NoData)));
    }

    #[test]
    fn test_body_sets_html_text_and_type() {
        let changes = interpret_fresh("", "<html><body><p>Hello world</p></body></html>").unwrap();
        assert_eq!(changes.data.html.as_deref(), Some("<p>Hello world</p>"));
        assert_eq!(changes.metadata.text.as_deref(), Some("Hello world"));
        assert_eq!(changes.document_type.as_deref(), Some("document"));
    }

    #[test]
    fn test_body_match_is_greedy_across_lines() {
        let raw = "<body>\n<p>one</p></body>\n<body><p>two</p>\n</body>";
        let changes = interpret_fresh("", raw).unwrap();
        assert_eq!(
            changes.data.html.as_deref(),
            Some("\n<p>one</p></body>\n<body><p>two</p>\n")
        );
    }

    #[test]
    fn test_tags_spanning_lines_are_stripped() {
        assert_eq!(html_to_text("<a\nhref=\"x\">link</a>"), "link");
    }

    #[test]
    fn test_whitespace_runs_keep_first_character() {
        assert_eq!(html_to_text("a \n\n b\t\t c\n \td"), "a b\tc\nd");
    }

    #[test]
    fn test_single_whitespace_untouched() {
        assert_eq!(html_to_text("a b\nc\td"), "a b\nc\td");
    }

    #[test]
    fn test_entities_decoded_then_brackets_escaped() {
        let changes = interpret_fresh(
            "",
            "<body>Hello &amp; &lt;script&gt;alert(1)&lt;/script&gt;</body>",
        )
        .unwrap();
        let text = changes.metadata.text.unwrap();
        assert_eq!(text, "Hello & &lt;script&gt;alert(1)&lt;/script&gt;");
        assert!(!text.contains('<'));
        assert!(!text.contains('>'));
    }

    #[test]
    fn test_named_and_numeric_entities() {
        assert_eq!(html_to_text("caf&eacute; &#8364;5 &#x41;&nbsp;B"), "café €5 A\u{a0}B");
    }

    #[test]
    fn test_entities_need_terminating_semicolon() {
        assert_eq!(html_to_text("a &amp b &amp; c"), "a &amp b & c");
    }

    #[test]
    fn test_no_body_leaves_seeded_record_untouched() {
        let mut changes = Changes::new();
        changes.data.html = Some("<p>from caller</p>".to_string());

        interpret("", "<html></html>", &mut changes).unwrap();
        assert_eq!(changes.data.html.as_deref(), Some("<p>from caller</p>"));
        assert!(changes.metadata.text.is_none());
    }

    #[test]
    fn test_replacement_characters_removed() {
        let changes = interpret_fresh("", "<body>na\u{FFFD}ve</body>").unwrap();
        assert_eq!(changes.metadata.text.as_deref(), Some("nave"));
        assert_eq!(changes.data.html.as_deref(), Some("nave"));
    }

    #[test]
    fn test_whitespace_only_body_clears_fields() {
        let mut changes = Changes::new();
        changes.data.html = Some("stale".to_string());
        changes.metadata.text = Some("stale".to_string());

        interpret("", "<body>\n<p>  </p>\n<div/>\n</body>", &mut changes).unwrap();
        assert!(changes.data.html.is_none());
        assert!(changes.metadata.text.is_none());
        assert!(changes.document_type.is_none());
    }

    #[test]
    fn test_empty_body_is_not_a_body() {
        let changes = interpret_fresh("", "<body></body>").unwrap();
        assert_eq!(changes, Changes::new());
    }

    #[test]
    fn test_no_body_without_warning_is_empty_result() {
        let changes = interpret_fresh("", "<html><head></head></html>").unwrap();
        assert!(changes.data.html.is_none());
        assert!(changes.metadata.text.is_none());
        assert!(changes.document_type.is_none());
    }

    #[test]
    fn test_no_body_with_warning_fails_with_warning() {
        let result = interpret_fresh("Unsupported format\n", "<html></html>");
        match result {
            Err(e) => assert_eq!(e.to_string(), "Unsupported format\n"),
            Ok(_) => panic!("expected the warning to become the error"),
        }
    }

    #[test]
    fn test_warning_with_body_is_ignored() {
        let changes = interpret_fresh("WARN - font\n", "<body>text</body>").unwrap();
        assert_eq!(changes.metadata.text.as_deref(), Some("text"));
    }

    #[test]
    fn test_content_type_without_body() {
        let raw = r#"<html><head><meta name="Content-Type" content="image/png"/></head></html>"#;
        let changes = interpret_fresh("", raw).unwrap();
        assert_eq!(changes.data.content_type.as_deref(), Some("image/png"));
        assert!(changes.data.html.is_none());
    }

    #[test]
    fn test_content_type_is_case_insensitive() {
        let raw = r#"<META NAME="content-type" CONTENT="application/pdf"/><body>x</body>"#;
        let changes = interpret_fresh("", raw).unwrap();
        assert_eq!(changes.data.content_type.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn test_content_type_requires_self_closing_tag() {
        let raw = r#"<meta name="Content-Type" content="text/plain"><body>x</body>"#;
        let changes = interpret_fresh("", raw).unwrap();
        assert!(changes.data.content_type.is_none());
    }

    #[test]
    fn test_interpret_is_idempotent() {
        let raw = concat!(
            r#"<meta name="Content-Type" content="application/pdf"/>"#,
            "<body><h1>Title</h1>\n\n<p>A &gt; B</p></body>"
        );
        let first = interpret_fresh("", raw).unwrap();
        let second = interpret_fresh("", raw).unwrap();
        assert_eq!(first, second);
    }
}
