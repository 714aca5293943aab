//! Relationships of the main document part
//!
//! Hyperlinks in WordprocessingML do not carry their URL inline. A
//! `<w:hyperlink r:id="rId7">` points at an entry of
//! `word/_rels/document.xml.rels`, which holds the actual target.
//!
//! # Example
//!
//! ```
//! use resumegen_ooxml::Relationships;
//!
//! let mut rels = Relationships::new();
//! let id = rels.add_hyperlink("mailto:jane@example.com");
//! assert_eq!(id, "rId1");
//! assert!(rels.to_xml().contains(r#"TargetMode="External""#));
//! ```

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Hyperlink relationship type
pub const TYPE_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";

/// A single `<Relationship>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g. `rId3`)
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path or URL
    pub target: String,
    /// `External` for URLs, None for parts inside the package
    pub target_mode: Option<String>,
}

impl Relationship {
    /// Check if this relationship is a hyperlink
    pub fn is_hyperlink(&self) -> bool {
        self.rel_type == TYPE_HYPERLINK
    }
}

/// Parsed relationships, kept in document order
#[derive(Debug, Clone)]
pub struct Relationships {
    entries: Vec<Relationship>,
    next_id: u32,
}

impl Default for Relationships {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl Relationships {
    /// Create an empty relationships list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse relationships from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut rels = Self::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = String::new();
                    let mut target_mode = None;

                    for attr in e.attributes().filter_map(|a| a.ok()) {
                        let value = attr.unescape_value()?.into_owned();
                        match attr.key.as_ref() {
                            b"Id" => id = Some(value),
                            b"Target" => target = Some(value),
                            b"Type" => rel_type = value,
                            b"TargetMode" => target_mode = Some(value),
                            _ => {}
                        }
                    }

                    if let (Some(id), Some(target)) = (id, target) {
                        rels.push(Relationship {
                            id,
                            rel_type,
                            target,
                            target_mode,
                        });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    fn push(&mut self, rel: Relationship) {
        if let Some(num) = id_number(&rel.id) {
            self.next_id = self.next_id.max(num + 1);
        }
        self.entries.push(rel);
    }

    /// Register an external hyperlink target and return its new ID
    ///
    /// Every call allocates a fresh ID, even for a target already present.
    pub fn add_hyperlink(&mut self, url: &str) -> String {
        let id = format!("rId{}", self.next_id);
        self.push(Relationship {
            id: id.clone(),
            rel_type: TYPE_HYPERLINK.to_string(),
            target: url.to_string(),
            target_mode: Some("External".to_string()),
        });
        id
    }

    /// Look up a relationship by ID
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.entries.iter().find(|rel| rel.id == id)
    }

    /// Iterate over relationships in document order
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    /// Number of relationships
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no relationships
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to the `.rels` XML format
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));

        for rel in &self.entries {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}""#,
                escape_attr(&rel.id),
                escape_attr(&rel.rel_type),
                escape_attr(&rel.target)
            ));
            if let Some(mode) = &rel.target_mode {
                xml.push_str(&format!(r#" TargetMode="{}""#, escape_attr(mode)));
            }
            xml.push_str("/>");
        }

        xml.push_str("</Relationships>");
        xml
    }
}

/// Numeric portion of a relationship ID (`rId5` -> 5)
fn id_number(id: &str) -> Option<u32> {
    id.strip_prefix("rId")
        .or_else(|| id.strip_prefix("RId"))
        .or_else(|| id.strip_prefix("rid"))
        .and_then(|num| num.parse().ok())
}

fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES_TYPE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

    #[test]
    fn test_parse_relationships() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
            <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
        </Relationships>"#;

        let rels = Relationships::parse(xml).unwrap();

        assert_eq!(rels.len(), 2);
        let link = rels.get("rId1").unwrap();
        assert_eq!(link.target, "https://example.com");
        assert!(link.is_hyperlink());
        assert_eq!(link.target_mode.as_deref(), Some("External"));
        assert!(!rels.get("rId2").unwrap().is_hyperlink());
    }

    #[test]
    fn test_new_ids_continue_after_highest() {
        let xml = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="t" Target="styles.xml"/>
            <Relationship Id="rId8" Type="t" Target="numbering.xml"/>
            <Relationship Id="rId3" Type="t" Target="settings.xml"/>
        </Relationships>"#;

        let mut rels = Relationships::parse(xml).unwrap();
        assert_eq!(rels.add_hyperlink("https://x.test"), "rId9");
        assert_eq!(rels.add_hyperlink("mailto:a@b.test"), "rId10");
    }

    #[test]
    fn test_same_target_gets_distinct_ids() {
        let mut rels = Relationships::new();
        let first = rels.add_hyperlink("https://x.test");
        let second = rels.add_hyperlink("https://x.test");
        assert_ne!(first, second);
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_serialize_and_reparse() {
        let mut rels = Relationships::new();
        rels.push(Relationship {
            id: "rId1".to_string(),
            rel_type: STYLES_TYPE.to_string(),
            target: "styles.xml".to_string(),
            target_mode: None,
        });
        rels.add_hyperlink("https://example.com/?a=1&b=2");

        let xml = rels.to_xml();
        assert!(xml.contains(&format!(r#"xmlns="{}""#, RELATIONSHIPS_NS)));
        assert!(xml.contains("a=1&amp;b=2"));

        let reparsed = Relationships::parse(xml.as_bytes()).unwrap();
        let ids: Vec<&str> = reparsed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rId1", "rId2"]);
        assert_eq!(
            reparsed.get("rId2").unwrap().target,
            "https://example.com/?a=1&b=2"
        );
        assert!(reparsed.get("rId1").unwrap().target_mode.is_none());
    }

    #[test]
    fn test_id_number() {
        assert_eq!(id_number("rId1"), Some(1));
        assert_eq!(id_number("rId123"), Some(123));
        assert_eq!(id_number("RId5"), Some(5));
        assert_eq!(id_number("invalid"), None);
        assert_eq!(id_number("rIdabc"), None);
    }
}
