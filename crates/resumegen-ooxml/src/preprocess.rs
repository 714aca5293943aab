//! Placeholder preparation for WordprocessingML parts
//!
//! Word rarely keeps a typed `{{ basics.name }}` in a single run: spell
//! checking, revision IDs and formatting changes split it across several
//! `<w:r>` elements. Before the Handlebars engine sees a part, the XML is
//! rewritten so that every tag is contiguous text again:
//!
//! 1. Braces separated by run markup are rejoined (`{</w:t></w:r><w:r><w:t>{`).
//! 2. Markup inside a `{{ … }}` tag is dropped and typographic quotes are
//!    straightened.
//! 3. `{{r name}}` replaces its whole enclosing run with the raw expression
//!    `{{{name}}}`, so a [`RichText`](crate::RichText) value can emit runs.
//! 4. A table row or paragraph whose only text is a block tag (`{{#each …}}`,
//!    `{{/each}}`, `{{else}}`, …) is replaced by the tag, which lets a block
//!    repeat whole rows or paragraphs.

use std::sync::OnceLock;

use regex::Regex;

/// Markup Word inserts inside a run: run/text/properties tags and empty elements
const RUN_MARKUP: &str = r"(?:</?w:(?:r|t|rPr)(?:\s[^>]*)?>|<w:[A-Za-z]+(?:\s[^>]*)?/>)";

fn split_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"\{{(?:{})+\{{", RUN_MARKUP)).unwrap())
}

fn split_close_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"\}}(?:{})+\}}", RUN_MARKUP)).unwrap())
}

fn xml_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

fn rich_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{r\s+([^{}\s]+)\s*\}\}").unwrap())
}

fn block_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\{\{~?\s*(?:[#^/][^{}]*|else(?:\s[^{}]*)?)\s*~?\}\}$").unwrap()
    })
}

/// Apply every preparation step to one XML part
pub fn prepare(xml: &str) -> String {
    let joined = join_split_braces(xml);
    let cleaned = clean_tags(&joined);
    let rich = expand_rich_runs(&cleaned);
    let rows = collapse_block_elements(&rich, "w:tr");
    collapse_block_elements(&rows, "w:p")
}

/// Rejoin `{{` and `}}` whose two braces ended up in different runs
pub fn join_split_braces(xml: &str) -> String {
    let opened = split_open_re().replace_all(xml, "{{");
    split_close_re().replace_all(&opened, "}}").into_owned()
}

/// Strip markup from inside every `{{ … }}` tag
///
/// A tag spanning a paragraph boundary is left as is.
pub fn clean_tags(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;

    while let Some(start) = rest.find("{{") {
        let Some(close) = rest[start + 2..].find("}}") else {
            break;
        };
        let end = start + 2 + close + 2;
        let tag = &rest[start..end];

        out.push_str(&rest[..start]);
        if tag.contains("</w:p>") {
            out.push_str(tag);
        } else {
            out.push_str(&normalize_tag(tag));
        }
        rest = &rest[end..];
    }

    out.push_str(rest);
    out
}

fn normalize_tag(tag: &str) -> String {
    xml_tag_re()
        .replace_all(tag, "")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

/// Replace the run enclosing each `{{r name}}` with `{{{name}}}`
pub fn expand_rich_runs(xml: &str) -> String {
    let mut out = xml.to_string();

    while let Some((tag_start, tag_end, name)) = next_rich_tag(&out) {
        let replacement = ["{{{", name.as_str(), "}}}"].concat();

        let run_start = last_open_tag(&out[..tag_start], "w:r")
            .filter(|&s| !out[s..tag_start].contains("</w:r>"));
        let run_end = out[tag_end..]
            .find("</w:r>")
            .map(|offset| tag_end + offset + "</w:r>".len());

        match (run_start, run_end) {
            (Some(start), Some(end)) => out.replace_range(start..end, &replacement),
            _ => out.replace_range(tag_start..tag_end, &replacement),
        }
    }

    out
}

fn next_rich_tag(xml: &str) -> Option<(usize, usize, String)> {
    let caps = rich_tag_re().captures(xml)?;
    let whole = caps.get(0)?;
    let name = caps.get(1)?;
    Some((whole.start(), whole.end(), name.as_str().to_string()))
}

/// Replace each `tag` element whose text is a single block tag by that tag
pub fn collapse_block_elements(xml: &str, tag: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    let mut pos = 0;

    while let Some(start) = find_open_tag(xml, tag, pos) {
        let Some(end) = element_end(xml, start, tag) else {
            break;
        };

        out.push_str(&xml[pos..start]);

        let text = xml_tag_re().replace_all(&xml[start..end], "");
        let text = text.trim();
        if block_tag_re().is_match(text) {
            out.push_str(text);
            pos = end;
        } else {
            // Step past '<' only, so nested elements are still visited
            out.push('<');
            pos = start + 1;
        }
    }

    out.push_str(&xml[pos..]);
    out
}

/// Byte offset of the next non-self-closing `<tag>` / `<tag …>` at or after `from`
fn find_open_tag(xml: &str, tag: &str, from: usize) -> Option<usize> {
    let needle = format!("<{}", tag);
    xml[from..]
        .match_indices(&needle)
        .map(|(offset, _)| from + offset)
        .find(|&i| is_open_tag_at(xml, i, needle.len()))
}

fn last_open_tag(xml: &str, tag: &str) -> Option<usize> {
    let needle = format!("<{}", tag);
    xml.rmatch_indices(&needle)
        .map(|(i, _)| i)
        .find(|&i| is_open_tag_at(xml, i, needle.len()))
}

fn is_open_tag_at(xml: &str, i: usize, needle_len: usize) -> bool {
    match xml.as_bytes().get(i + needle_len) {
        Some(b'>') => true,
        Some(b' ' | b'\t' | b'\r' | b'\n') => !is_self_closing(xml, i),
        _ => false,
    }
}

fn is_self_closing(xml: &str, i: usize) -> bool {
    xml[i..]
        .find('>')
        .map(|gt| xml[..i + gt].ends_with('/'))
        .unwrap_or(false)
}

/// Byte offset just past the `</tag>` matching the element opened at `start`
fn element_end(xml: &str, start: usize, tag: &str) -> Option<usize> {
    let close = format!("</{}>", tag);
    let open_len = tag.len() + 1;
    let mut depth = 0usize;
    let mut pos = start;

    loop {
        let next_close = pos + xml[pos..].find(&close)?;
        match find_open_tag(xml, tag, pos) {
            Some(open) if open < next_close => {
                depth += 1;
                pos = open + open_len;
            }
            _ => {
                depth = depth.checked_sub(1)?;
                pos = next_close + close.len();
                if depth == 0 {
                    return Some(pos);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_split_braces() {
        let xml = r#"<w:r><w:t>{</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>{ name }</w:t></w:r><w:r><w:t>}</w:t></w:r>"#;
        assert_eq!(
            join_split_braces(xml),
            "<w:r><w:t>{{ name }}</w:t></w:r>"
        );
    }

    #[test]
    fn test_braces_across_paragraphs_are_not_joined() {
        let xml = "<w:p><w:r><w:t>{</w:t></w:r></w:p><w:p><w:r><w:t>{</w:t></w:r></w:p>";
        assert_eq!(join_split_braces(xml), xml);
    }

    #[test]
    fn test_clean_tags_strips_markup_inside_tag() {
        let xml = r#"<w:t>{{ basics.<w:proofErr w:type="spellStart"/>name<w:proofErr w:type="spellEnd"/> }}</w:t>"#;
        assert_eq!(clean_tags(xml), "<w:t>{{ basics.name }}</w:t>");
    }

    #[test]
    fn test_clean_tags_straightens_quotes() {
        let xml = "<w:t>{{#if (eq lang \u{201C}fr\u{201D})}}</w:t>";
        assert_eq!(clean_tags(xml), "<w:t>{{#if (eq lang \"fr\")}}</w:t>");
    }

    #[test]
    fn test_clean_tags_leaves_unclosed_tag() {
        let xml = "<w:t>{{ oops</w:t>";
        assert_eq!(clean_tags(xml), xml);
    }

    #[test]
    fn test_expand_rich_run_replaces_whole_run() {
        let xml = r#"<w:p><w:r><w:t>Mail: </w:t></w:r><w:r w:rsidR="00A1"><w:rPr><w:i/></w:rPr><w:t>{{r email_link}}</w:t></w:r></w:p>"#;
        assert_eq!(
            expand_rich_runs(xml),
            r#"<w:p><w:r><w:t>Mail: </w:t></w:r>{{{email_link}}}</w:p>"#
        );
    }

    #[test]
    fn test_expand_rich_tag_outside_run() {
        let xml = "<w:r><w:t>a</w:t></w:r>{{r x}}";
        assert_eq!(expand_rich_runs(xml), "<w:r><w:t>a</w:t></w:r>{{{x}}}");
    }

    #[test]
    fn test_rich_tag_ignores_rpr_when_searching_run_start() {
        let xml = "<w:r><w:rPr><w:b/></w:rPr><w:t>{{r website_link}}</w:t></w:r>";
        assert_eq!(expand_rich_runs(xml), "{{{website_link}}}");
    }

    #[test]
    fn test_collapse_block_paragraphs() {
        let xml = concat!(
            "<w:body>",
            "<w:p><w:r><w:t>{{#each work}}</w:t></w:r></w:p>",
            "<w:p><w:pPr/><w:r><w:t>{{name}}</w:t></w:r></w:p>",
            "<w:p><w:r><w:t>{{/each}}</w:t></w:r></w:p>",
            "</w:body>"
        );
        assert_eq!(
            collapse_block_elements(xml, "w:p"),
            "<w:body>{{#each work}}<w:p><w:pPr/><w:r><w:t>{{name}}</w:t></w:r></w:p>{{/each}}</w:body>"
        );
    }

    #[test]
    fn test_collapse_keeps_mixed_paragraph() {
        let xml = "<w:p><w:r><w:t>Items: {{#each a}}x{{/each}}</w:t></w:r></w:p>";
        assert_eq!(collapse_block_elements(xml, "w:p"), xml);
    }

    #[test]
    fn test_collapse_skips_self_closing_paragraphs() {
        let xml = r#"<w:p w14:paraId="1"/><w:p><w:r><w:t>{{else}}</w:t></w:r></w:p><w:p/>"#;
        assert_eq!(
            collapse_block_elements(xml, "w:p"),
            r#"<w:p w14:paraId="1"/>{{else}}<w:p/>"#
        );
    }

    #[test]
    fn test_collapse_table_row() {
        let xml = concat!(
            "<w:tbl>",
            "<w:tr><w:tc><w:p><w:r><w:t>{{#each skills}}</w:t></w:r></w:p></w:tc><w:tc><w:p/></w:tc></w:tr>",
            "<w:tr><w:tc><w:p><w:r><w:t>{{name}}</w:t></w:r></w:p></w:tc></w:tr>",
            "<w:tr><w:tc><w:p><w:r><w:t>{{/each}}</w:t></w:r></w:p></w:tc></w:tr>",
            "</w:tbl>"
        );
        let out = prepare(xml);
        assert!(out.starts_with("<w:tbl>{{#each skills}}<w:tr>"), "got: {out}");
        assert!(out.ends_with("</w:tr>{{/each}}</w:tbl>"), "got: {out}");
    }

    #[test]
    fn test_element_end_handles_nesting() {
        let xml = "<w:tr><w:tc><w:tbl><w:tr></w:tr></w:tbl></w:tc></w:tr>tail";
        assert_eq!(element_end(xml, 0, "w:tr"), Some(xml.len() - "tail".len()));
    }
}
