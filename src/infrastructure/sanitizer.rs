//! Allow-list sanitization of rich-text editor output.
//!
//! Built on `ammonia`: anything outside the editor's formatting vocabulary is
//! dropped, including scripts, event handlers and script-capable URL schemes.
//! Inline `style` is restricted to the color and alignment declarations the
//! editor emits. `data:` URLs survive only as base64 raster images on
//! `<img src>`, which is how the editor embeds pasted and uploaded pictures.

use std::{borrow::Cow, collections::HashSet};

use ammonia::Builder as AmmoniaBuilder;

use crate::application::ports::util::ContentSanitizer;

const ALLOWED_STYLE_PROPERTIES: [&str; 3] = ["color", "background-color", "text-align"];
const ALLOWED_IMAGE_DATA_PREFIXES: [&str; 4] = [
    "data:image/png;base64,",
    "data:image/jpeg;base64,",
    "data:image/gif;base64,",
    "data:image/webp;base64,",
];

pub struct AmmoniaContentSanitizer {
    builder: AmmoniaBuilder<'static>,
}

impl AmmoniaContentSanitizer {
    pub fn new() -> Self {
        Self {
            builder: build_post_sanitizer(),
        }
    }
}

impl Default for AmmoniaContentSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSanitizer for AmmoniaContentSanitizer {
    fn sanitize(&self, raw: &str) -> String {
        keep_pre_leading_newlines(&self.builder.clean(raw).to_string())
    }
}

fn build_post_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "b",
        "blockquote",
        "br",
        "code",
        "del",
        "div",
        "em",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "hr",
        "i",
        "img",
        "li",
        "mark",
        "ol",
        "p",
        "pre",
        "s",
        "span",
        "strike",
        "strong",
        "sub",
        "sup",
        "u",
        "ul",
    ]);
    builder.tags(tags);

    let generic: HashSet<&'static str> = HashSet::from(["class", "style", "title"]);
    builder.generic_attributes(generic);

    builder.add_tag_attributes("a", &["href", "target"]);
    builder.add_tag_attributes("img", &["src", "alt", "width", "height"]);
    builder.add_tag_attributes("ol", &["start"]);
    builder.add_tag_attributes("li", &["data-list"]);
    builder.add_tag_attributes("pre", &["spellcheck"]);

    builder.url_schemes(HashSet::from(["http", "https", "mailto", "tel", "data"]));
    builder.link_rel(Some("noopener noreferrer"));

    builder.attribute_filter(|element, attribute, value| {
        if attribute.eq_ignore_ascii_case("style") {
            sanitize_style_attribute(value).map(Cow::Owned)
        } else if is_data_url(value) {
            let embedded_image = element.eq_ignore_ascii_case("img")
                && attribute.eq_ignore_ascii_case("src")
                && is_safe_image_data_url(value);
            embedded_image.then_some(Cow::Borrowed(value))
        } else {
            Some(Cow::Borrowed(value))
        }
    });

    builder
}

/// Keeps only allow-listed declarations; `None` drops the attribute entirely.
fn sanitize_style_attribute(value: &str) -> Option<String> {
    let kept: Vec<&str> = value
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty() && is_safe_style_declaration(decl))
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join("; "))
    }
}

fn is_data_url(value: &str) -> bool {
    value
        .trim_start()
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Base64 PNG, JPEG, GIF or WebP. SVG is excluded since it can carry script.
fn is_safe_image_data_url(value: &str) -> bool {
    let value = value.trim();
    ALLOWED_IMAGE_DATA_PREFIXES.iter().any(|prefix| {
        value
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
            && value[prefix.len()..]
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
    })
}

/// The HTML parser drops a newline directly after `<pre>` and the serializer
/// does not write it back, so each pass would lose one. Doubling it makes the
/// output reparse to itself.
///
/// Operates on serializer output: text never contains a raw `<` and attribute
/// values are always double-quoted.
fn keep_pre_leading_newlines(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut tag_start: Option<usize> = None;
    let mut in_quotes = false;

    for (i, c) in html.char_indices() {
        out.push(c);
        match (tag_start, c) {
            (None, '<') => tag_start = Some(i),
            (Some(_), '"') => in_quotes = !in_quotes,
            (Some(start), '>') if !in_quotes => {
                tag_start = None;
                if is_pre_start_tag(&html[start..=i]) && html[i + 1..].starts_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
    out
}

fn is_pre_start_tag(tag: &str) -> bool {
    tag[1..]
        .trim_end_matches('>')
        .split(|c: char| c.is_ascii_whitespace())
        .next()
        .is_some_and(|name| name.eq_ignore_ascii_case("pre"))
}

fn is_safe_style_declaration(decl: &str) -> bool {
    let Some((property, value)) = decl.split_once(':') else {
        return false;
    };
    let property = property.trim().to_ascii_lowercase();
    if !ALLOWED_STYLE_PROPERTIES.contains(&property.as_str()) {
        return false;
    }

    let lower = value.to_ascii_lowercase();
    const FORBIDDEN_SUBSTRINGS: [&str; 8] = [
        "url(",
        "expression(",
        "javascript:",
        "vbscript:",
        "-moz-binding",
        "behavior:",
        "@import",
        "\\",
    ];
    !value.trim().is_empty() && !FORBIDDEN_SUBSTRINGS.iter().any(|needle| lower.contains(needle))
}
