//! bible.com verse-of-the-day page extractor
//!
//! The page is a Next.js render. Three things are pulled out of it:
//! - the verse image: the first `<img>` whose `src` carries the `640x640`
//!   signature, unwrapped from the `/_next/image?url=...` proxy to the
//!   original `https://s3...` asset
//! - the verse card: the first `div` whose class holds both `max-w-[530px]`
//!   and `shadow-light-2` and whose text mentions "Verse of the Day"
//! - inside the card, the `/bible/compare/` link (passage) and the next
//!   `/bible/` link with a parenthesized translation (citation)

use crate::models::{VerseText, UNKNOWN};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Size signature of the verse image
pub const IMAGE_SIGNATURE: &str = "640x640";

/// Start of the original image asset URL inside the proxy URL
pub const ASSET_URL_PREFIX: &str = "https://s3";

/// Text the verse card must contain
pub const CARD_MARKER: &str = "Verse of the Day";

const CARD_CLASSES: [&str; 2] = ["max-w-[530px]", "shadow-light-2"];

/// Tag interior where quoted attribute values may contain `>`
/// (Tailwind variants such as `[&>p]:mbs-1`)
const TAG_BODY: &str = r#"(?:[^>"']|"[^"]*"|'[^']*')*"#;

static IMG_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?is)<img\b{}>", TAG_BODY)).expect("valid regex"));
static DIV_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?is)<div\b{}>", TAG_BODY)).expect("valid regex"));
static DIV_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(/?)div\b").expect("valid regex"));
static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?is)<a\b({})>(.*?)</a\s*>", TAG_BODY)).expect("valid regex")
});
static ANY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?s)<{}>", TAG_BODY)).expect("valid regex"));
static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#([xX][0-9a-fA-F]+|[0-9]+);").expect("valid regex"));
static SRC_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)(?:^|\s)src\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex"));
static CLASS_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex"));
static HREF_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)(?:^|\s)href\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex"));

/// Signature of a page extractor
pub type PageExtractor = fn(&str) -> VersePageExtract;

/// Signature of a text-only extractor
pub type TextExtractor = fn(&str) -> VerseText;

/// Fields found on the verse page; anything missing stays `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersePageExtract {
    pub image_url: Option<String>,
    pub citation: Option<String>,
    pub passage: Option<String>,
}

impl VersePageExtract {
    /// Citation and passage with [`UNKNOWN`] in place of missing fields
    pub fn text_or_unknown(&self) -> VerseText {
        VerseText::new(
            self.citation.as_deref().unwrap_or(UNKNOWN),
            self.passage.as_deref().unwrap_or(UNKNOWN),
        )
    }
}

/// Extract image, citation and passage from the verse page
pub fn extract_verse_page(html: &str) -> VersePageExtract {
    let (citation, passage) = find_card_links(html);
    VersePageExtract {
        image_url: find_image_url(html),
        citation,
        passage,
    }
}

/// Extract only citation and passage, defaulting each to [`UNKNOWN`]
pub fn extract_verse_text(html: &str) -> VerseText {
    let (citation, passage) = find_card_links(html);
    VerseText::new(
        citation.unwrap_or_else(|| UNKNOWN.to_string()),
        passage.unwrap_or_else(|| UNKNOWN.to_string()),
    )
}

/// First `<img>` carrying [`IMAGE_SIGNATURE`] that unwraps to an asset URL
pub fn find_image_url(html: &str) -> Option<String> {
    IMG_TAG.find_iter(html).find_map(|tag| {
        let src = decode_entities(&attr(&SRC_ATTR, tag.as_str())?);
        if !src.contains(IMAGE_SIGNATURE) {
            return None;
        }
        unwrap_proxy_url(&src)
    })
}

/// Recover the original asset URL from an image-proxy `src`
///
/// Handles both a bare asset URL and one percent-encoded inside the proxy's
/// query string. The URL ends at the first `&` or space.
pub fn unwrap_proxy_url(src: &str) -> Option<String> {
    if let Some(url) = asset_url_in(src) {
        return Some(url);
    }

    let (_, query) = src.split_once('?')?;
    url::form_urlencoded::parse(query.as_bytes()).find_map(|(_, value)| asset_url_in(&value))
}

fn asset_url_in(text: &str) -> Option<String> {
    let start = text.find(ASSET_URL_PREFIX)?;
    let tail = &text[start..];
    let end = tail
        .find(|c: char| c == '&' || c == ' ')
        .unwrap_or(tail.len());
    Some(tail[..end].to_string())
}

fn find_card_links(html: &str) -> (Option<String>, Option<String>) {
    for open in DIV_OPEN.find_iter(html) {
        let class = attr(&CLASS_ATTR, open.as_str()).unwrap_or_default();
        if !CARD_CLASSES.iter().all(|marker| class.contains(marker)) {
            continue;
        }

        let body = element_body(html, open.end());
        if !visible_text(body).contains(CARD_MARKER) {
            continue;
        }

        return card_links(body);
    }

    (None, None)
}

fn card_links(card: &str) -> (Option<String>, Option<String>) {
    let mut passage = None;
    let mut citation = None;

    for anchor in ANCHOR.captures_iter(card) {
        let href = attr(&HREF_ATTR, &anchor[1]).unwrap_or_default();
        let text = visible_text(&anchor[2]);

        if href.contains("/bible/compare/") {
            passage = Some(trim_quotes(&text).to_string());
        } else if href.contains("/bible/") && text.contains('(') {
            citation = Some(text);
            break;
        }
    }

    (citation, passage)
}

/// Inner markup of the `div` whose opening tag ends at `start`
///
/// Runs to the end of the document if the closing tag is missing.
fn element_body(html: &str, start: usize) -> &str {
    let rest = &html[start..];
    let mut depth = 1usize;

    for boundary in DIV_BOUNDARY.captures_iter(rest) {
        if boundary[1].is_empty() {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                let end = boundary.get(0).map_or(rest.len(), |m| m.start());
                return &rest[..end];
            }
        }
    }

    rest
}

/// Text content with tags removed, each text run trimmed and concatenated
fn visible_text(fragment: &str) -> String {
    ANY_TAG
        .split(fragment)
        .map(|run| decode_entities(run).trim().to_string())
        .filter(|run| !run.is_empty())
        .collect()
}

fn trim_quotes(text: &str) -> &str {
    text.trim()
        .trim_matches(|c: char| matches!(c, '"' | '\u{201c}' | '\u{201d}'))
}

fn attr(pattern: &Regex, tag: &str) -> Option<String> {
    let caps = pattern.captures(tag)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let numeric: Cow<'_, str> = NUMERIC_ENTITY.replace_all(text, |caps: &Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    numeric
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
