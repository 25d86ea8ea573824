//! In-page anchor scanner for HTML documents

use std::borrow::Cow;

use tracing::{debug, warn};

use crate::parser::error::MarkupError;

/// Check whether `html` contains an element addressable as `#anchor`
///
/// Matches any element whose `id` equals the anchor, and any `<a>` whose
/// legacy `name` attribute equals it. Values are compared byte for byte after
/// character references (`&amp;`, `&#233;`, `&#x2F;`) are decoded; tag and
/// attribute names compare case-insensitively as HTML does. Broken markup is
/// scanned as far as tree-sitter recovers it.
pub fn contains_anchor(html: &str, anchor: &str) -> Result<bool, MarkupError> {
    let mut parser = tree_sitter::Parser::new();
    let language = tree_sitter_html::LANGUAGE;
    parser.set_language(&language.into()).map_err(|e| {
        warn!("Failed to set HTML language for tree-sitter: {}", e);
        MarkupError::TreeSitter(e.to_string())
    })?;

    let tree = parser.parse(html, None).ok_or_else(|| {
        warn!("Failed to parse HTML content");
        MarkupError::NoTree
    })?;

    let mut cursor = tree.walk();
    loop {
        let node = cursor.node();
        if matches!(node.kind(), "start_tag" | "self_closing_tag")
            && tag_declares_anchor(node, html, anchor)
        {
            debug!("Found anchor {:?} at byte {}", anchor, node.start_byte());
            return Ok(true);
        }

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return Ok(false);
            }
        }
    }
}

fn tag_declares_anchor(tag: tree_sitter::Node, source: &str, anchor: &str) -> bool {
    let mut cursor = tag.walk();
    let mut is_link = false;
    let mut declared = false;

    for child in tag.children(&mut cursor) {
        match child.kind() {
            "tag_name" => is_link = node_text(child, source).eq_ignore_ascii_case("a"),
            "attribute" => {
                let Some((name, value)) = attribute(child, source) else {
                    continue;
                };
                if decode_entities(value) != anchor {
                    continue;
                }
                if name.eq_ignore_ascii_case("id") {
                    return true;
                }
                if name.eq_ignore_ascii_case("name") {
                    declared = true;
                }
            }
            _ => {}
        }
    }

    is_link && declared
}

/// Returns (name, value) of an attribute node; valueless attributes yield ""
fn attribute<'a>(node: tree_sitter::Node, source: &'a str) -> Option<(&'a str, &'a str)> {
    let mut cursor = node.walk();
    let mut name = None;
    let mut value = "";

    for child in node.children(&mut cursor) {
        match child.kind() {
            "attribute_name" => name = Some(node_text(child, source)),
            "attribute_value" => value = node_text(child, source),
            "quoted_attribute_value" => {
                let mut inner_cursor = child.walk();
                value = child
                    .children(&mut inner_cursor)
                    .find(|inner| inner.kind() == "attribute_value")
                    .map(|inner| node_text(inner, source))
                    .unwrap_or("");
            }
            _ => {}
        }
    }

    name.map(|name| (name, value))
}

/// Decode character references in an attribute value
///
/// Covers the XML named references and numeric references. Anything else is
/// kept as written.
fn decode_entities(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        let reference = &rest[start..];
        let resolved = reference
            .find(';')
            .and_then(|end| decode_reference(&reference[1..end]).map(|c| (c, end)));
        match resolved {
            Some((c, end)) => {
                decoded.push(c);
                rest = &reference[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = &reference[1..];
            }
        }
    }
    decoded.push_str(rest);

    Cow::Owned(decoded)
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

fn node_text<'a>(node: tree_sitter::Node, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or_default()
}
