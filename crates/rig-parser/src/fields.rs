//! Description / topology / author extraction from header text.
//!
//! Precedence: explicit `field Key: value` tags, then bare `Key: value`
//! lines, then (description only) the first line of the first paragraph.
//! Any tag in the header disables the bare-line pass for every field.

use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Description,
    Topology,
    Author,
}

impl Field {
    const ALL: [Self; 3] = [Self::Description, Self::Topology, Self::Author];

    /// Case-insensitive key alternatives.
    const fn keys(self) -> &'static str {
        match self {
            Self::Description => "description|desc",
            Self::Topology => "topology",
            Self::Author => "author",
        }
    }
}

/// Fields derived from a header block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    pub description: Option<String>,
    pub topology: Option<String>,
    pub author: Option<String>,
}

impl HeaderFields {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Description => &mut self.description,
            Field::Topology => &mut self.topology,
            Field::Author => &mut self.author,
        }
    }
}

fn compile(template: &str) -> Vec<(Field, Regex)> {
    Field::ALL
        .iter()
        .filter_map(|field| {
            let pattern = template.replace("{keys}", field.keys());
            Regex::new(&pattern).ok().map(|re| (*field, re))
        })
        .collect()
}

static TAG_PATTERNS: LazyLock<Vec<(Field, Regex)>> =
    LazyLock::new(|| compile(r"(?i):?field\s+(?:{keys})\s*:\s*(.+)"));

static BARE_PATTERNS: LazyLock<Vec<(Field, Regex)>> =
    LazyLock::new(|| compile(r"(?i)^\s*(?:{keys})\s*:\s*(.+)$"));

/// First non-empty capture of `re` over the lines of `header`.
fn first_match(re: &Regex, header: &str) -> Option<String> {
    header.lines().find_map(|line| {
        re.captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|value| !value.is_empty())
            .map(String::from)
    })
}

/// Derive the three header fields from `header`.
#[must_use]
pub fn extract_fields(header: &str) -> HeaderFields {
    let mut fields = HeaderFields::default();
    if header.trim().is_empty() {
        return fields;
    }

    let mut tagged = false;
    for (field, re) in TAG_PATTERNS.iter() {
        if let Some(value) = first_match(re, header) {
            *fields.slot(*field) = Some(value);
            tagged = true;
        }
    }

    if !tagged {
        for (field, re) in BARE_PATTERNS.iter() {
            *fields.slot(*field) = first_match(re, header);
        }
    }

    if fields.description.is_none() {
        fields.description = header
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(String::from);
    }

    fields
}
