//! Document rendering: resume JSON + DOCX template -> DOCX

use std::path::{Path, PathBuf};

use resumegen_ooxml::{DocxTemplate, OoxmlError, RichText};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ResumeError, Result};
use crate::resume::{LinkFields, ResumeRecord};

/// Rendering switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fail on placeholders with no value instead of leaving them empty
    pub strict: bool,
}

/// Render `resume` into `template` and save the result at `output`
pub fn render(resume: &Path, template: &Path, output: &Path) -> Result<PathBuf> {
    render_with(resume, template, output, RenderOptions::default())
}

/// [`render`] with explicit options
pub fn render_with(
    resume: &Path,
    template: &Path,
    output: &Path,
    options: RenderOptions,
) -> Result<PathBuf> {
    info!("Loading json file {}", resume.display());
    let mut record = ResumeRecord::load(resume)?;

    let mut doc = DocxTemplate::load(template)
        .map_err(|source| ResumeError::LoadTemplate {
            path: template.to_path_buf(),
            source,
        })?
        .with_strict(options.strict);

    let links = LinkFields::from_record(&record);
    attach_links(&mut record, &links, &mut doc);

    let to_render_error = |source: OoxmlError| ResumeError::Render {
        path: output.to_path_buf(),
        source,
    };
    doc.render(record.as_value()).map_err(to_render_error)?;
    doc.save(output).map_err(to_render_error)?;

    Ok(output.to_path_buf())
}

/// Store each link as rich text under its reserved key
///
/// Each link gets its own hyperlink relationship in `doc`.
pub fn attach_links(record: &mut ResumeRecord, links: &LinkFields, doc: &mut DocxTemplate) {
    for (key, link) in links.iter() {
        let url_id = doc.build_url_id(&link.target);
        let mut text = RichText::new();
        text.add(link.text.as_str(), Some(url_id.as_str()));

        debug!("Attached {} -> {}", key, link.target);
        record.insert(key, Value::String(text.to_xml()));
    }
}
