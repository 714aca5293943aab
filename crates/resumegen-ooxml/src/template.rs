//! DOCX templates with Handlebars placeholders
//!
//! # Example
//!
//! ```no_run
//! use resumegen_ooxml::{DocxTemplate, RichText};
//! use serde_json::json;
//!
//! let mut template = DocxTemplate::load("templates/simple-en.docx")?;
//!
//! let url_id = template.build_url_id("mailto:jane@example.com");
//! let mut email = RichText::new();
//! email.add("jane@example.com", Some(url_id.as_str()));
//!
//! template.render(&json!({
//!     "basics": { "name": "Jane Doe" },
//!     "email_link": email.to_xml(),
//! }))?;
//! template.save("out/simple-en.docx")?;
//! # Ok::<(), resumegen_ooxml::OoxmlError>(())
//! ```

use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::archive::{OoxmlArchive, DOCUMENT_RELS_PART};
use crate::error::{OoxmlError, Result};
use crate::preprocess;
use crate::relationships::Relationships;
use crate::richtext::escape_text;

/// A loaded DOCX template ready for placeholder binding
#[derive(Debug, Clone)]
pub struct DocxTemplate {
    archive: OoxmlArchive,
    relationships: Relationships,
    strict: bool,
}

impl DocxTemplate {
    /// Load a template from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_archive(OoxmlArchive::open(path)?)
    }

    /// Load a template from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_archive(OoxmlArchive::from_reader(std::io::Cursor::new(bytes))?)
    }

    /// Wrap an unpacked archive, which must contain `word/document.xml`
    pub fn from_archive(archive: OoxmlArchive) -> Result<Self> {
        archive.document_xml()?;

        let relationships = match archive.document_rels_xml() {
            Some(xml) => Relationships::parse(xml)?,
            None => Relationships::new(),
        };

        Ok(Self {
            archive,
            relationships,
            strict: false,
        })
    }

    /// Fail on placeholders missing from the context instead of rendering them empty
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Register an external hyperlink and return its relationship ID
    pub fn build_url_id(&mut self, url: &str) -> String {
        let id = self.relationships.add_hyperlink(url);
        debug!("Registered hyperlink {} -> {}", id, url);
        id
    }

    /// Document relationships, including hyperlinks added so far
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// The underlying package
    pub fn archive(&self) -> &OoxmlArchive {
        &self.archive
    }

    /// Bind `context` into the body, headers and footers
    pub fn render<T: Serialize>(&mut self, context: &T) -> Result<()> {
        let mut engine = Handlebars::new();
        engine.register_escape_fn(escape_text);
        engine.set_strict_mode(self.strict);

        for part in self.archive.templated_parts() {
            let Some(xml) = self.archive.get_string(&part) else {
                continue;
            };

            let prepared = preprocess::prepare(&xml);
            let rendered =
                engine
                    .render_template(&prepared, context)
                    .map_err(|e| OoxmlError::Render {
                        part: part.clone(),
                        message: e.to_string(),
                    })?;

            debug!("Rendered {} ({} bytes)", part, rendered.len());
            self.archive.set_string(part, rendered);
        }

        self.sync_relationships();
        Ok(())
    }

    fn sync_relationships(&mut self) {
        if !self.relationships.is_empty() || self.archive.contains(DOCUMENT_RELS_PART) {
            self.archive
                .set_string(DOCUMENT_RELS_PART, self.relationships.to_xml());
        }
    }

    /// Save the document, creating or overwriting `path`
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.sync_relationships();
        self.archive.write_to_file(path)
    }

    /// Serialize the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.sync_relationships();
        let mut buffer = std::io::Cursor::new(Vec::new());
        self.archive.write_to(&mut buffer)?;
        Ok(buffer.into_inner())
    }
}
