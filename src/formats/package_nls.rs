//! `package.nls.json` and its localized `package.nls.<tag>.json` siblings.
//!
//! The English file is generated straight from the English XLIFF. Localized files are driven by
//! the English file: they carry exactly its keys, in its order, and fall back to its values
//! wherever the locale has no translation.
//!
//! The text is assembled line by line rather than through a JSON serializer, and values are not
//! JSON-escaped. The only rewrite is `"` → `'`.

use std::io::Write;

use crate::{
    error::Error,
    escape::normalize_double_quotes,
    locale::Locale,
    traits::Generator,
    types::{ReferenceKeySet, TranslationDictionary, TranslationEntry},
};

/// Name of the default-locale metadata file.
pub const PACKAGE_NLS_FILE_NAME: &str = "package.nls.json";

/// Literal prefix of the XLIFF files package metadata is generated from.
pub const PACKAGE_XLIFF_PREFIX: &str = "localizedPackage.json.";

const LINE_ENDING: &str = "\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNls {
    pub locale: Locale,
    /// `(key, value)` in output order, before quote normalization.
    pub entries: Vec<(String, String)>,
}

/// Which side of a unit a mode reads.
#[derive(Debug, Clone, Copy)]
enum Side {
    Source,
    Target,
}

impl Side {
    fn of(self, entry: &TranslationEntry) -> &str {
        match self {
            Side::Source => &entry.source,
            Side::Target => &entry.target,
        }
    }
}

/// Value for `key`: the chosen side of the unit, or `fallback` when that is empty or the unit is
/// missing. Without a fallback an empty or missing value stays empty.
fn resolve_key(
    dict: &TranslationDictionary,
    key: &str,
    side: Side,
    fallback: Option<&str>,
) -> String {
    let value = dict.get(key).map(|entry| side.of(entry)).unwrap_or_default();
    match fallback {
        Some(fallback) if value.is_empty() => fallback.to_string(),
        _ => value.to_string(),
    }
}

impl PackageNls {
    /// Generation mode: the English dictionary's own keys with their source text.
    pub fn generate(dict: &TranslationDictionary) -> Self {
        Self {
            locale: Locale::DEFAULT,
            entries: dict
                .ids()
                .map(|key| (key.to_string(), resolve_key(dict, key, Side::Source, None)))
                .collect(),
        }
    }

    /// Localization mode: the reference keys with the localized target text.
    ///
    /// Keys only present in `dict` are dropped. Keys missing from `dict`, or whose target is
    /// empty, take the reference value.
    pub fn localize(
        dict: &TranslationDictionary,
        reference: &ReferenceKeySet,
        locale: Locale,
    ) -> Self {
        Self {
            locale,
            entries: reference
                .iter()
                .map(|(key, english)| {
                    (
                        key.to_string(),
                        resolve_key(dict, key, Side::Target, Some(english)),
                    )
                })
                .collect(),
        }
    }

    pub fn file_name(&self) -> String {
        package_nls_file_name(self.locale)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Generator for PackageNls {
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut lines = vec!["{".to_string()];
        for (index, (key, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                if let Some(previous) = lines.last_mut() {
                    previous.push(',');
                }
            }
            lines.push(format!("\"{}\":\"{}\"", key, normalize_double_quotes(value)));
        }
        lines.push("}".to_string());

        for line in lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(LINE_ENDING.as_bytes())?;
        }
        Ok(())
    }
}

/// `package.nls.json` for the default locale, `package.nls.<public tag>.json` otherwise.
pub fn package_nls_file_name(locale: Locale) -> String {
    if locale.is_default() {
        PACKAGE_NLS_FILE_NAME.to_string()
    } else {
        format!("package.nls.{}.json", locale.public_tag())
    }
}
