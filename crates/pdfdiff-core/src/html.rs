//! HTML rendering of an edit script for textual review

use crate::types::{DiffSegment, Operation};

/// Render segments as an HTML fragment.
///
/// Insertions become `<ins>`, deletions `<del>`, unchanged text `<span>`.
/// Newlines are shown as a pilcrow followed by a line break.
pub fn pretty_html(segments: &[DiffSegment]) -> String {
    let mut html = String::new();

    for segment in segments {
        let text = escape(&segment.text);
        match segment.operation {
            Operation::Insert => {
                html.push_str("<ins style=\"background:#e6ffe6;\">");
                html.push_str(&text);
                html.push_str("</ins>");
            }
            Operation::Delete => {
                html.push_str("<del style=\"background:#ffe6e6;\">");
                html.push_str(&text);
                html.push_str("</del>");
            }
            Operation::Equal => {
                html.push_str("<span>");
                html.push_str(&text);
                html.push_str("</span>");
            }
        }
    }

    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' => out.push_str("&para;<br>"),
            other => out.push(other),
        }
    }
    out
}
