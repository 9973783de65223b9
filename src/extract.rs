//! Field extraction from agent answers.
//!
//! The agent reports facts as free text; this module scans the whole answer
//! (not line by line) for each recognized field and assembles a
//! [`CompanyRecord`]. Extraction is per-field independent: one field failing
//! to match never affects another.

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;

/// Labeled fields extracted with the shared `"<Label> - <value>"` pattern.
///
/// Pairs of (label as it appears in the answer, field name in the record).
/// Label matching is case-sensitive; the lowercase "code" in "Postal code"
/// matches the wording of the research prompt and must stay in sync with it.
pub const FIELD_LABELS: &[(&str, &str)] = &[
    ("Website", "Website"),
    ("Postal code", "Postal Code"),
    ("Address", "Address"),
    ("City", "City"),
    ("Products", "Products"),
    ("Services", "Services"),
    ("Revenue", "Revenue"),
    ("Competitors", "Competitors"),
    ("Branches", "Branches"),
    ("Careers", "Careers"),
];

/// Structured result of parsing one agent answer.
///
/// Field names are unique; every field is optional. The record is built
/// once per lookup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompanyRecord {
    fields: BTreeMap<String, String>,
}

impl CompanyRecord {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, field: &str, value: String) {
        self.fields.insert(field.to_string(), value);
    }
}

/// Compiled extraction rule set.
pub struct Extractor {
    email: Regex,
    email_valid: Regex,
    phone: Regex,
    phone_valid: Regex,
    labeled: Vec<(&'static str, Regex)>,
}

impl Extractor {
    pub fn new() -> Self {
        // The generic email match is deliberately looser than the
        // validation pattern: a located candidate can still be rejected.
        let email = Regex::new(r"[\w.\-]+@[\w.\-]+\.\w+").expect("valid regex");
        let email_valid = Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("valid regex");

        // Optional "+", up to 3 digits of country code, then 10 digits.
        let phone = Regex::new(r"\+?\d{1,3}?\d{10}").expect("valid regex");
        let phone_valid = Regex::new(r"^\+?\d{1,3}?\d{10}$").expect("valid regex");

        let labeled = FIELD_LABELS
            .iter()
            .map(|&(label, field)| {
                let pattern = format!(r"{} - ([\w\s,./:()]+)", regex::escape(label));
                (field, Regex::new(&pattern).expect("valid regex"))
            })
            .collect();

        Self {
            email,
            email_valid,
            phone,
            phone_valid,
            labeled,
        }
    }

    /// Parse one agent answer into a record. Fields whose pattern does not
    /// match (or whose match fails validation) are simply absent.
    pub fn parse(&self, text: &str) -> CompanyRecord {
        let mut record = CompanyRecord::default();

        if let Some(m) = self.email.find(text) {
            if self.email_valid.is_match(m.as_str()) {
                record.insert("Email", m.as_str().to_string());
            }
        }

        if let Some(m) = self.phone.find(text) {
            if self.phone_valid.is_match(m.as_str()) {
                record.insert("Phone Number", m.as_str().to_string());
            }
        }

        for (field, pattern) in &self.labeled {
            if let Some(caps) = pattern.captures(text) {
                // The value class includes whitespace, so a capture can run
                // over a trailing newline; trim so it never reaches the record.
                let value = caps[1].trim();
                if !value.is_empty() {
                    record.insert(field, value.to_string());
                }
            }
        }

        record
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}
