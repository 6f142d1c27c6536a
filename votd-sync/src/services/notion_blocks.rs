//! Notion block JSON builders

use crate::dates::heading_date;
use crate::models::VerseRecord;
use serde_json::{json, Value};

fn rich_text(content: &str) -> Value {
    json!([{
        "type": "text",
        "text": { "content": content }
    }])
}

pub fn divider() -> Value {
    json!({
        "object": "block",
        "type": "divider",
        "divider": {}
    })
}

/// `heading_1` .. `heading_3`; other levels clamp into that range
pub fn heading(level: u8, content: &str, color: Option<&str>) -> Value {
    let kind = format!("heading_{}", level.clamp(1, 3));
    let mut body = json!({ "rich_text": rich_text(content) });
    if let Some(color) = color {
        body["color"] = json!(color);
    }

    let mut block = json!({
        "object": "block",
        "type": kind
    });
    block[kind.as_str()] = body;
    block
}

pub fn paragraph(content: &str, color: Option<&str>) -> Value {
    let mut body = json!({ "rich_text": rich_text(content) });
    if let Some(color) = color {
        body["color"] = json!(color);
    }

    json!({
        "object": "block",
        "type": "paragraph",
        "paragraph": body
    })
}

pub fn quote(content: &str) -> Value {
    json!({
        "object": "block",
        "type": "quote",
        "quote": { "rich_text": rich_text(content) }
    })
}

pub fn toggle(content: &str) -> Value {
    json!({
        "object": "block",
        "type": "toggle",
        "toggle": {
            "rich_text": rich_text(content),
            "color": "default"
        }
    })
}

pub fn external_image(url: &str) -> Value {
    json!({
        "object": "block",
        "type": "image",
        "image": {
            "type": "external",
            "external": { "url": url }
        }
    })
}

/// Full dated entry: divider, date heading, citation heading, passage quote, image
pub fn verse_entry(record: &VerseRecord, image_url: &str) -> Vec<Value> {
    vec![
        divider(),
        heading(
            2,
            &format!("Verse of the Day - {}", heading_date(record.date())),
            None,
        ),
        heading(3, record.citation(), None),
        quote(record.passage()),
        external_image(image_url),
    ]
}

/// Header for a page section that collects daily verses in a toggle
pub fn devotional_section() -> Vec<Value> {
    vec![
        divider(),
        heading(1, "Daily Devotionals", Some("blue")),
        paragraph("Automatic daily verses from YouVersion Bible", Some("gray")),
        toggle("Current Month"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_heading_shape() {
        let block = heading(2, "Title", None);
        assert_eq!(block["type"], "heading_2");
        assert_eq!(block["heading_2"]["rich_text"][0]["text"]["content"], "Title");
        assert!(block["heading_2"].get("color").is_none());

        let colored = heading(7, "Clamped", Some("blue"));
        assert_eq!(colored["type"], "heading_3");
        assert_eq!(colored["heading_3"]["color"], "blue");
    }

    #[test]
    fn test_verse_entry_order() {
        let record = VerseRecord::new(
            "John 3:16 (ESV)",
            "For God so loved the world",
            Some("https://img/x.jpg".to_string()),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        );
        let blocks = verse_entry(&record, "https://img/x.jpg");

        let types: Vec<&str> = blocks.iter().filter_map(|b| b["type"].as_str()).collect();
        assert_eq!(types, vec!["divider", "heading_2", "heading_3", "quote", "image"]);
        assert_eq!(
            blocks[1]["heading_2"]["rich_text"][0]["text"]["content"],
            "Verse of the Day - March 14, 2025"
        );
        assert_eq!(blocks[4]["image"]["external"]["url"], "https://img/x.jpg");
    }

    #[test]
    fn test_devotional_section_ends_with_toggle() {
        let blocks = devotional_section();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[3]["type"], "toggle");
        assert_eq!(blocks[1]["heading_1"]["color"], "blue");
    }
}
