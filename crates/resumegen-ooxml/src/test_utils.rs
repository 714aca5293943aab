//! DOCX fixtures for tests
//!
//! Enabled for this crate's unit tests and, through the `test-utils`
//! feature, for the tests of dependent crates.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

/// Build a package holding the given parts plus content types and package rels
pub fn docx_with_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();

    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(PACKAGE_RELS.as_bytes()).unwrap();

    for (name, contents) in parts {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }

    zip.finish().unwrap();
    buffer.into_inner()
}

/// Wrap body content in a `word/document.xml` with the usual namespaces
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{}</w:body></w:document>"#,
        body
    )
}

/// Build a minimal DOCX whose body is `body`
pub fn docx_with_body(body: &str) -> Vec<u8> {
    let document = document_xml(body);
    docx_with_parts(&[
        ("word/document.xml", document.as_str()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS),
    ])
}

/// A resume-shaped template using plain, rich-link and repeated placeholders
pub fn resume_template() -> Vec<u8> {
    docx_with_body(concat!(
        r#"<w:p><w:r><w:t>{{basics.name}}</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>{{r website_link}}</w:t></w:r><w:r><w:t xml:space="preserve"> | </w:t></w:r><w:r><w:t>{{r email_link}}</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>{{#each work}}</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>{{name}}</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>{{/each}}</w:t></w:r></w:p>"#,
    ))
}
