//! Header block location: the text block the metadata fields are read from.
//!
//! A triple-quoted block wins when one opens and closes inside the first
//! [`HEADER_WINDOW`] characters; otherwise the run of leading line comments is used.

/// How far into the file a triple-quoted header may appear, in characters.
pub const HEADER_WINDOW: usize = 4096;

const TRIPLE_DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

/// Return the header text of `source`, or an empty string when there is none.
#[must_use]
pub fn locate_header(source: &str) -> String {
    triple_quoted(source)
        .or_else(|| leading_comments(source))
        .unwrap_or_default()
}

/// The first [`HEADER_WINDOW`] characters of `source`.
fn window(source: &str) -> &str {
    let end = source
        .char_indices()
        .nth(HEADER_WINDOW)
        .map_or(source.len(), |(i, _)| i);
    &source[..end]
}

fn triple_quoted(source: &str) -> Option<String> {
    let window = window(source);
    let (start, delimiter) = TRIPLE_DELIMITERS
        .iter()
        .filter_map(|d| window.find(d).map(|i| (i, *d)))
        .min_by_key(|(i, _)| *i)?;
    let body_start = start + delimiter.len();
    let body_len = window[body_start..].find(delimiter)?;
    Some(dedent(&window[body_start..body_start + body_len]))
}

fn leading_comments(source: &str) -> Option<String> {
    let mut lines = source.lines().peekable();
    if lines.peek().is_some_and(|first| first.starts_with("#!")) {
        lines.next();
    }

    let mut collected: Vec<&str> = Vec::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if collected.is_empty() {
                continue;
            }
            break;
        }
        let Some(text) = strip_comment_marker(trimmed) else {
            break;
        };
        collected.push(text);
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n").trim().to_string())
    }
}

fn strip_comment_marker(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix("//")
        .or_else(|| line.strip_prefix('#'))?;
    Some(rest.strip_prefix(' ').unwrap_or(rest).trim_end())
}

/// Docstring cleanup: drop the common indentation of every line after the
/// first, then trim surrounding blank space.
pub(crate) fn dedent(text: &str) -> String {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or_default().trim();
    let rest: Vec<&str> = lines.collect();

    let indent = rest
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = String::from(first);
    for line in rest {
        out.push('\n');
        if line.len() >= indent && line.is_char_boundary(indent) {
            out.push_str(line[indent..].trim_end());
        } else {
            out.push_str(line.trim());
        }
    }
    out.trim().to_string()
}
