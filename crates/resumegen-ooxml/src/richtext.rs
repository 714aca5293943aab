//! Rich text values for `{{r name}}` placeholders
//!
//! A rich text value is pre-rendered WordprocessingML that replaces the whole
//! run holding its placeholder. It is how clickable links reach the output.

use std::fmt;

/// Character style Word applies to hyperlinks
pub const HYPERLINK_STYLE: &str = "Hyperlink";

#[derive(Debug, Clone, PartialEq, Eq)]
struct RichRun {
    text: String,
    url_id: Option<String>,
}

/// A sequence of runs, each optionally wrapped in a hyperlink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    runs: Vec<RichRun>,
}

impl RichText {
    /// Create an empty rich text value
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run of text
    ///
    /// `url_id` is a relationship ID obtained from
    /// [`DocxTemplate::build_url_id`](crate::DocxTemplate::build_url_id).
    pub fn add(&mut self, text: impl Into<String>, url_id: Option<&str>) -> &mut Self {
        self.runs.push(RichRun {
            text: text.into(),
            url_id: url_id.map(str::to_string),
        });
        self
    }

    /// Check if no runs were added
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Render as WordprocessingML run content
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        for run in &self.runs {
            match &run.url_id {
                Some(id) => {
                    xml.push_str(&format!(r#"<w:hyperlink r:id="{}">"#, escape_text(id)));
                    push_run(&mut xml, &run.text, Some(HYPERLINK_STYLE));
                    xml.push_str("</w:hyperlink>");
                }
                None => push_run(&mut xml, &run.text, None),
            }
        }
        xml
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

fn push_run(xml: &mut String, text: &str, style: Option<&str>) {
    xml.push_str("<w:r>");
    if let Some(style) = style {
        xml.push_str(&format!(r#"<w:rPr><w:rStyle w:val="{}"/></w:rPr>"#, style));
    }
    // Line breaks inside a value become <w:br/> within the same run
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        xml.push_str(r#"<w:t xml:space="preserve">"#);
        xml.push_str(&escape_text(line));
        xml.push_str("</w:t>");
    }
    xml.push_str("</w:r>");
}

/// Escape text for XML content and attribute values
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_run() {
        let mut rt = RichText::new();
        rt.add("Hello", None);
        assert_eq!(
            rt.to_xml(),
            r#"<w:r><w:t xml:space="preserve">Hello</w:t></w:r>"#
        );
    }

    #[test]
    fn test_hyperlink_run() {
        let mut rt = RichText::new();
        rt.add("jane@example.com", Some("rId4"));

        let xml = rt.to_xml();
        assert!(xml.starts_with(r#"<w:hyperlink r:id="rId4"><w:r>"#));
        assert!(xml.contains(r#"<w:rStyle w:val="Hyperlink"/>"#));
        assert!(xml.contains(">jane@example.com</w:t>"));
        assert!(xml.ends_with("</w:r></w:hyperlink>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut rt = RichText::new();
        rt.add("R&D <team>", None);
        assert!(rt.to_xml().contains("R&amp;D &lt;team&gt;"));
    }

    #[test]
    fn test_newline_becomes_break() {
        let mut rt = RichText::new();
        rt.add("line one\nline two", None);
        assert!(rt
            .to_xml()
            .contains(r#"line one</w:t><w:br/><w:t xml:space="preserve">line two"#));
    }

    #[test]
    fn test_multiple_runs_in_order() {
        let mut rt = RichText::new();
        rt.add("Site: ", None).add("https://x.test", Some("rId2"));

        let xml = rt.to_xml();
        let plain = xml.find("Site: ").unwrap();
        let link = xml.find("<w:hyperlink").unwrap();
        assert!(plain < link);
        assert_eq!(rt.to_string(), xml);
    }
}
