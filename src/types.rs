//! Core, format-agnostic types for xliffnls.
//! The XLIFF extractor decodes into these; every generator reads from them.

use std::{
    io::{BufRead, ErrorKind},
    path::Path,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{error::Error, traits::Parser};

/// One `<trans-unit>`: its id plus source and target text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationEntry {
    /// The `id` attribute of the unit.
    pub id: String,

    /// Original-language text.
    pub source: String,

    /// Translated text, empty when the unit has not been translated yet.
    pub target: String,
}

impl TranslationEntry {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// The target when there is one, otherwise the source.
    pub fn resolved(&self) -> &str {
        if self.target.is_empty() {
            &self.source
        } else {
            &self.target
        }
    }
}

/// All units of one XLIFF document, keyed by id, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationDictionary {
    entries: IndexMap<String, TranslationEntry>,
}

impl TranslationDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. A repeated id replaces the earlier value but keeps its position.
    pub fn insert(&mut self, entry: TranslationEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    pub fn get(&self, id: &str) -> Option<&TranslationEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collapses every entry to its resolved string (target first, source as fallback).
    pub fn resolve(&self) -> ResolvedDictionary {
        ResolvedDictionary(
            self.entries
                .iter()
                .map(|(id, entry)| (id.clone(), entry.resolved().to_string()))
                .collect(),
        )
    }
}

impl FromIterator<TranslationEntry> for TranslationDictionary {
    fn from_iter<T: IntoIterator<Item = TranslationEntry>>(iter: T) -> Self {
        let mut dict = TranslationDictionary::new();
        for entry in iter {
            dict.insert(entry);
        }
        dict
    }
}

impl<'a> IntoIterator for &'a TranslationDictionary {
    type Item = &'a TranslationEntry;
    type IntoIter = indexmap::map::Values<'a, String, TranslationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Flat id → string mapping, as written to `*.i18n.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ResolvedDictionary(pub IndexMap<String, String>);

impl ResolvedDictionary {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The keys of the default-locale `package.nls.json` with their English values.
///
/// Localized package metadata always carries exactly these keys, in this order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct ReferenceKeySet(IndexMap<String, String>);

impl ReferenceKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads a previously generated `package.nls.json`.
    ///
    /// A missing file is reported as [`Error::MissingReference`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        Self::read_from(path).map_err(|e| match e {
            Error::Io(io) if io.kind() == ErrorKind::NotFound => {
                Error::MissingReference(path.to_path_buf())
            }
            other => other,
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReferenceKeySet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Parser for ReferenceKeySet {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        serde_json::from_reader(reader).map_err(Error::Parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TranslationDictionary {
        [
            TranslationEntry::new("a", "Apple", "Pomme"),
            TranslationEntry::new("b", "Banana", ""),
            TranslationEntry::new("c", "", ""),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_resolved_prefers_target() {
        assert_eq!(TranslationEntry::new("a", "Apple", "Pomme").resolved(), "Pomme");
        assert_eq!(TranslationEntry::new("b", "Banana", "").resolved(), "Banana");
        assert_eq!(TranslationEntry::new("c", "", "").resolved(), "");
    }

    #[test]
    fn test_dictionary_keeps_document_order() {
        let dict = sample();
        assert_eq!(dict.ids().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("b"));
        assert!(!dict.contains("z"));
    }

    #[test]
    fn test_duplicate_id_last_write_wins_first_position() {
        let mut dict = sample();
        dict.insert(TranslationEntry::new("a", "Apricot", ""));
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.ids().next(), Some("a"));
        assert_eq!(dict.get("a").unwrap().source, "Apricot");
    }

    #[test]
    fn test_resolve() {
        let resolved = sample().resolve();
        assert_eq!(
            resolved.iter().collect::<Vec<_>>(),
            vec![("a", "Pomme"), ("b", "Banana"), ("c", "")]
        );
    }

    #[test]
    fn test_reference_key_set_keeps_file_order() {
        let json = r#"{"zeta": "Z", "alpha": "A", "mid": "M"}"#;
        let refs = ReferenceKeySet::from_str(json).unwrap();
        assert_eq!(
            refs.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["zeta", "alpha", "mid"]
        );
        assert_eq!(refs.get("alpha"), Some("A"));
    }

    #[test]
    fn test_reference_key_set_rejects_non_string_values() {
        assert!(ReferenceKeySet::from_str(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn test_reference_key_set_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.nls.json");
        let err = ReferenceKeySet::load(&path).unwrap_err();
        assert!(matches!(err, Error::MissingReference(p) if p == path));
    }
}
