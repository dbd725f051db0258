use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Labels the search UI needs from the localization table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationKey {
    /// Prefix of the missing-terms line
    TermMissing,
    /// Summary of a collapsed group holding one section
    MoreOne,
    /// Summary of a collapsed group holding several sections
    MoreOther,
    /// Result count labels
    ResultNone,
    ResultOne,
    ResultOther,
}

impl TranslationKey {
    pub const ALL: [TranslationKey; 6] = [
        TranslationKey::TermMissing,
        TranslationKey::MoreOne,
        TranslationKey::MoreOther,
        TranslationKey::ResultNone,
        TranslationKey::ResultOne,
        TranslationKey::ResultOther,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationKey::TermMissing => "search.result.term.missing",
            TranslationKey::MoreOne => "search.result.more.one",
            TranslationKey::MoreOther => "search.result.more.other",
            TranslationKey::ResultNone => "search.result.none",
            TranslationKey::ResultOne => "search.result.one",
            TranslationKey::ResultOther => "search.result.other",
        }
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_TRANSLATIONS: HashMap<&'static str, &'static str> = {
        [
            (TranslationKey::TermMissing, "Missing"),
            (TranslationKey::MoreOne, "1 more result"),
            (TranslationKey::MoreOther, "# more results"),
            (TranslationKey::ResultNone, "No matching documents"),
            (TranslationKey::ResultOne, "1 matching document"),
            (TranslationKey::ResultOther, "# matching documents"),
        ]
        .iter()
        .map(|(key, value)| (key.as_str(), *value))
        .collect()
    };
}

/// Localization lookup
pub trait Translator {
    /// Resolve `key`. With `Some(count)` every `#` in the template becomes the
    /// count; with `None` the template is returned verbatim.
    fn translate(&self, key: TranslationKey, count: Option<usize>) -> String;
}

/// Key -> template table, falling back to English for keys it lacks
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    table: HashMap<String, String>,
}

impl Translations {
    /// English labels only
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: TranslationKey, template: &str) -> Self {
        self.table.insert(key.as_str().to_string(), template.to_string());
        self
    }

    /// Load a JSON object of key -> template
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open translations {}", path.display()))?;
        let translations: Translations = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse translations {}", path.display()))?;

        for key in TranslationKey::ALL {
            if !translations.table.contains_key(key.as_str()) {
                tracing::warn!("translation for '{}' missing, using English", key.as_str());
            }
        }

        Ok(translations)
    }

    fn template(&self, key: TranslationKey) -> &str {
        self.table
            .get(key.as_str())
            .map(String::as_str)
            .or_else(|| DEFAULT_TRANSLATIONS.get(key.as_str()).copied())
            .unwrap_or(key.as_str())
    }
}

impl Translator for Translations {
    fn translate(&self, key: TranslationKey, count: Option<usize>) -> String {
        let template = self.template(key);
        match count {
            Some(count) => template.replace('#', &count.to_string()),
            None => template.to_string(),
        }
    }
}
