//! Resume records and the link fields derived from them
//!
//! A resume is a free-form JSON tree. The only structure relied upon is a
//! `basics` object, whose optional `website` and `email` strings become
//! clickable links in the rendered document.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{ResumeError, Result};

/// Reserved key holding the rendered website link
pub const WEBSITE_LINK_KEY: &str = "website_link";

/// Reserved key holding the rendered email link
pub const EMAIL_LINK_KEY: &str = "email_link";

/// Resume data loaded from JSON
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeRecord {
    data: Value,
}

impl ResumeRecord {
    /// Load and parse a resume file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ResumeError::LoadResume {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let data: Value = serde_json::from_str(&content).map_err(|e| ResumeError::LoadResume {
            path: path.to_path_buf(),
            reason: format!("invalid JSON: {}", e),
        })?;

        Self::from_value(data).ok_or_else(|| ResumeError::LoadResume {
            path: path.to_path_buf(),
            reason: "missing \"basics\" section".to_string(),
        })
    }

    /// Wrap a JSON value, which must be an object with a `basics` object
    pub fn from_value(data: Value) -> Option<Self> {
        data.get("basics")?.as_object()?;
        Some(Self { data })
    }

    /// A non-empty string field of `basics`
    pub fn basics_str(&self, key: &str) -> Option<&str> {
        self.data
            .get("basics")?
            .get(key)?
            .as_str()
            .filter(|s| !s.is_empty())
    }

    /// Set a top-level key, replacing any existing value
    pub fn insert(&mut self, key: &str, value: Value) {
        if let Value::Object(map) = &mut self.data {
            map.insert(key.to_string(), value);
        }
    }

    /// Look up a top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The whole record as JSON
    pub fn as_value(&self) -> &Value {
        &self.data
    }
}

/// Visible text paired with the link target it opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkField {
    /// Text shown in the document
    pub text: String,
    /// URL the link resolves to
    pub target: String,
}

impl LinkField {
    /// Website link: the text is the target
    pub fn website(url: &str) -> Self {
        Self {
            text: url.to_string(),
            target: url.to_string(),
        }
    }

    /// Email link: shows the address, targets `mailto:<address>`
    pub fn email(address: &str) -> Self {
        Self {
            text: address.to_string(),
            target: format!("mailto:{}", address),
        }
    }
}

/// Link fields derived from a record's `basics`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFields {
    pub website: Option<LinkField>,
    pub email: Option<LinkField>,
}

impl LinkFields {
    /// Derive links from `basics.website` and `basics.email`
    ///
    /// Absent, empty and non-string fields produce no link.
    pub fn from_record(record: &ResumeRecord) -> Self {
        Self {
            website: record.basics_str("website").map(LinkField::website),
            email: record.basics_str("email").map(LinkField::email),
        }
    }

    /// Present links with the reserved key each is stored under
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &LinkField)> {
        [
            (WEBSITE_LINK_KEY, self.website.as_ref()),
            (EMAIL_LINK_KEY, self.email.as_ref()),
        ]
        .into_iter()
        .filter_map(|(key, link)| link.map(|link| (key, link)))
    }

    /// Check if no link was derived
    pub fn is_empty(&self) -> bool {
        self.website.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: Value) -> ResumeRecord {
        ResumeRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_website_link_targets_itself() {
        let links = LinkFields::from_record(&record(json!({
            "basics": { "website": "https://x.test" }
        })));

        let website = links.website.unwrap();
        assert_eq!(website.text, "https://x.test");
        assert_eq!(website.target, website.text);
        assert!(links.email.is_none());
    }

    #[test]
    fn test_email_link_targets_mailto() {
        let links = LinkFields::from_record(&record(json!({
            "basics": { "email": "a@b.test" }
        })));

        let email = links.email.unwrap();
        assert_eq!(email.text, "a@b.test");
        assert_eq!(email.target, "mailto:a@b.test");
        assert!(links.website.is_none());
    }

    #[test]
    fn test_missing_or_empty_fields_produce_no_links() {
        for basics in [
            json!({}),
            json!({ "website": "", "email": "" }),
            json!({ "website": null, "email": 42 }),
        ] {
            let links = LinkFields::from_record(&record(json!({ "basics": basics })));
            assert!(links.is_empty());
            assert_eq!(links.iter().count(), 0);
        }
    }

    #[test]
    fn test_iter_uses_reserved_keys_in_order() {
        let links = LinkFields::from_record(&record(json!({
            "basics": { "email": "a@b.test", "website": "https://x.test" }
        })));

        let keys: Vec<&str> = links.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![WEBSITE_LINK_KEY, EMAIL_LINK_KEY]);
    }

    #[test]
    fn test_from_value_requires_basics_object() {
        assert!(ResumeRecord::from_value(json!({ "work": [] })).is_none());
        assert!(ResumeRecord::from_value(json!({ "basics": "Jane" })).is_none());
        assert!(ResumeRecord::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn test_insert_does_not_touch_source_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("resume-en.json");
        let content = r#"{"basics":{"name":"Jane"}}"#;
        fs::write(&path, content).unwrap();

        let mut rec = ResumeRecord::load(&path).unwrap();
        rec.insert(EMAIL_LINK_KEY, json!("<w:r/>"));

        assert_eq!(rec.get(EMAIL_LINK_KEY), Some(&json!("<w:r/>")));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_load_errors_name_the_file() {
        let temp = TempDir::new().unwrap();

        let missing = temp.path().join("resume-de.json");
        let err = ResumeRecord::load(&missing).unwrap_err();
        assert!(err.to_string().contains("resume-de.json"));

        let broken = temp.path().join("resume-en.json");
        fs::write(&broken, "{ not json").unwrap();
        let err = ResumeRecord::load(&broken).unwrap_err();
        assert!(matches!(err, ResumeError::LoadResume { ref reason, .. } if reason.starts_with("invalid JSON")));

        let no_basics = temp.path().join("resume-fr.json");
        fs::write(&no_basics, r#"{"work": []}"#).unwrap();
        let err = ResumeRecord::load(&no_basics).unwrap_err();
        assert!(err.to_string().contains("basics"));
    }
}
