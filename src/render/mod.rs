//! Output rendering
//!
//! Turns an envelope into the text printed for the caller. Rendering never
//! fails; optional fields that are missing are left out.

use crate::results::{Envelope, ErrorResponse, SearchResponse, SearchResult};
use crate::search::OutputFormat;

/// Render an envelope in the requested format
pub fn render(envelope: &Envelope, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(envelope),
        OutputFormat::Markdown => match envelope {
            Envelope::Success(response) => markdown(response),
            Envelope::Failure(error) => markdown_error(error),
        },
    }
}

/// Pretty-printed JSON; non-ASCII text is emitted as-is
pub fn to_json(envelope: &Envelope) -> String {
    // Serializing plain structs of strings and numbers cannot fail; NaN
    // scores become `null` rather than an error.
    serde_json::to_string_pretty(envelope).unwrap_or_else(|e| {
        format!(
            "{{\"success\":false,\"error\":{:?},\"error_code\":\"UNKNOWN_ERROR\",\"query\":{:?}}}",
            e.to_string(),
            envelope.query()
        )
    })
}

/// Numbered Markdown list of results
pub fn markdown(response: &SearchResponse) -> String {
    if response.is_empty() {
        return "No results found.\n".to_string();
    }

    let mut out = String::new();
    for (i, result) in response.results.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        push_entry(&mut out, i + 1, result);
    }
    out
}

fn push_entry(out: &mut String, position: usize, result: &SearchResult) {
    let title = if result.title.is_empty() {
        result.url.as_str()
    } else {
        result.title.as_str()
    };
    out.push_str(&format!(
        "{}. [{}]({})\n",
        position,
        escape_link_text(title),
        escape_link_target(&result.url)
    ));

    if !result.snippet.is_empty() {
        for line in result.snippet.lines() {
            out.push_str("   > ");
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    let mut meta = Vec::new();
    if let Some(site) = result.display_site() {
        meta.push(format!("Source: {}", site));
    }
    if let Some(ref date) = result.date {
        meta.push(format!("Date: {}", date));
    }
    if let Some(score) = result.score.filter(|s| s.is_finite()) {
        meta.push(format!("Score: {:.2}", score));
    }
    if !meta.is_empty() {
        out.push_str(&format!("   *{}*\n", meta.join(" | ")));
    }
}

fn markdown_error(error: &ErrorResponse) -> String {
    format!("**Search failed** ({}): {}\n", error.error_code, error.error)
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

// Characters that would end or split an inline link destination
fn escape_link_target(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            c if c.is_whitespace() => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{:02X}", b));
                }
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn two_results() -> SearchResponse {
        SearchResponse::new(
            "rust",
            vec![
                SearchResult::new("https://www.rust-lang.org/", "Rust")
                    .with_snippet("A language empowering everyone")
                    .with_site("rust-lang.org")
                    .with_score(0.987),
                SearchResult::new("https://doc.rust-lang.org/book/", "The [Rust] Book")
                    .with_snippet("first line\nsecond line"),
            ],
        )
    }

    #[test]
    fn test_markdown_numbered_entries() {
        let text = markdown(&two_results());
        let entries: Vec<_> = text
            .lines()
            .filter(|l| l.starts_with(|c: char| c.is_ascii_digit()))
            .collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], "1. [Rust](https://www.rust-lang.org/)");
        assert_eq!(entries[1], "2. [The \\[Rust\\] Book](https://doc.rust-lang.org/book/)");
        assert!(text.contains("   > A language empowering everyone"));
        assert!(text.contains("   > first line\n   > second line"));
        assert!(text.contains("*Source: rust-lang.org | Score: 0.99*"));
    }

    #[test]
    fn test_markdown_score_omitted_when_absent() {
        let text = markdown(&two_results());
        let second = text.split("2. ").nth(1).unwrap();
        assert!(!second.contains("Score"));
        assert!(second.contains("Source: doc.rust-lang.org"));
    }

    #[test]
    fn test_markdown_link_target_escaped() {
        let response = SearchResponse::new(
            "rust",
            vec![SearchResult::new("https://en.wikipedia.org/wiki/Rust_(programming language)", "Rust")],
        );
        let text = markdown(&response);
        assert!(text.starts_with(
            "1. [Rust](https://en.wikipedia.org/wiki/Rust_%28programming%20language%29)\n"
        ));
    }

    #[test]
    fn test_markdown_empty() {
        let text = markdown(&SearchResponse::new("q", vec![]));
        assert_eq!(text, "No results found.\n");
    }

    #[test]
    fn test_render_error_markdown() {
        let envelope = Envelope::Failure(ErrorResponse::new("q", ErrorCode::AuthError, "missing creds"));
        let text = render(&envelope, OutputFormat::Markdown);
        assert_eq!(text, "**Search failed** (AUTH_ERROR): missing creds\n");
    }

    #[test]
    fn test_render_json_round_trip() {
        let envelope = Envelope::Success(two_results());
        let text = render(&envelope, OutputFormat::Json);
        let parsed: Envelope = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn test_render_json_keeps_unicode() {
        let envelope = Envelope::Success(SearchResponse::new(
            "异步编程",
            vec![SearchResult::new("https://example.cn/", "异步")],
        ));
        let text = render(&envelope, OutputFormat::Json);
        assert!(text.contains("异步编程"));
        assert!(text.contains("\"type\": \"web\""));
    }
}
