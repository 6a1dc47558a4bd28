//! Bundled language catalog
//!
//! Static code -> display name mapping used to populate both language
//! pickers. Parsed once; read-only afterwards.

use serde::Deserialize;
use std::sync::OnceLock;

use crate::shared::error::{AppError, AppResult};
use crate::shared::types::Language;

const BUNDLED_CATALOG: &str = include_str!("../../assets/languages.json");

static BUNDLED: OnceLock<LanguageCatalog> = OnceLock::new();

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    /// Parse a catalog of the form `{ "<code>": { "name": "<display>" } }`.
    /// Entry order is kept as written.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(raw)?;
        let mut languages = Vec::with_capacity(map.len());

        for (code, value) in map {
            let entry: CatalogEntry = serde_json::from_value(value)?;
            languages.push(Language { code, display_name: entry.name });
        }

        if languages.is_empty() {
            return Err(AppError::Validation("Language catalog is empty".to_string()));
        }

        Ok(Self { languages })
    }

    /// The catalog shipped with the crate
    pub fn bundled() -> &'static LanguageCatalog {
        BUNDLED.get_or_init(|| {
            Self::from_json(BUNDLED_CATALOG).unwrap_or_else(|e| {
                log::error!("[Catalog] Bundled catalog unreadable ({}), using minimal fallback", e);
                Self::fallback()
            })
        })
    }

    fn fallback() -> Self {
        Self {
            languages: vec![
                Language { code: "en".to_string(), display_name: "English".to_string() },
                Language { code: "ta".to_string(), display_name: "Tamil".to_string() },
            ],
        }
    }

    pub fn list(&self) -> &[Language] {
        &self.languages
    }

    pub fn get(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Lenient lookup for typed input.
    ///
    /// Tries, in order: exact code, case-insensitive code, case-insensitive
    /// display name, ISO 639-3 code mapped to ISO 639-1, and finally the first
    /// entry whose primary subtag matches (`zh` -> `zh-Hans`).
    pub fn resolve(&self, input: &str) -> Option<&Language> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(lang) = self.get(input) {
            return Some(lang);
        }

        let lowered = input.to_lowercase();
        if let Some(lang) = self.languages.iter().find(|l| l.code.to_lowercase() == lowered) {
            return Some(lang);
        }
        if let Some(lang) = self.languages.iter().find(|l| l.display_name.to_lowercase() == lowered) {
            return Some(lang);
        }

        let primary = isolang::Language::from_639_3(&lowered)
            .and_then(|l| l.to_639_1())
            .map(str::to_string)
            .unwrap_or(lowered);

        self.get(&primary).or_else(|| {
            self.languages
                .iter()
                .find(|l| l.code.split('-').next().map(str::to_lowercase).as_deref() == Some(primary.as_str()))
        })
    }
}
