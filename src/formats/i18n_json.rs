//! Per-locale `*.i18n.json` dictionaries.
//!
//! Each unit is reduced to one string (target, or source when untranslated) and the flat
//! mapping is written as tab-indented JSON followed by a newline.

use std::io::{BufRead, Write};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{
    error::Error,
    traits::Generator,
    types::{ResolvedDictionary, TranslationDictionary},
};

/// Suffix replacing everything after the first `.` of the input file name.
pub const I18N_JSON_SUFFIX: &str = ".i18n.json";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct I18nJson {
    pub dictionary: ResolvedDictionary,
}

impl I18nJson {
    pub fn from_dictionary(dict: &TranslationDictionary) -> Self {
        Self {
            dictionary: dict.resolve(),
        }
    }

    /// Reads a generated file back.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        Ok(Self {
            dictionary: serde_json::from_reader(reader)?,
        })
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        Self::from_reader(s.as_bytes())
    }
}

impl Generator for I18nJson {
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut serializer = Serializer::with_formatter(&mut writer, formatter);
        self.dictionary.serialize(&mut serializer)?;
        writer.write_all(b"\n").map_err(Error::Io)
    }
}

/// Output file name for an input file name: `localizedConstants.deu.xlf` becomes
/// `localizedConstants.i18n.json`. A name without any `.` is used whole as the stem.
pub fn i18n_json_file_name(input_file_name: &str) -> String {
    let stem = input_file_name
        .split_once('.')
        .map_or(input_file_name, |(stem, _)| stem);
    format!("{stem}{I18N_JSON_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TranslationEntry;

    fn dict(entries: &[(&str, &str, &str)]) -> TranslationDictionary {
        entries
            .iter()
            .map(|(id, source, target)| TranslationEntry::new(*id, *source, *target))
            .collect()
    }

    #[test]
    fn test_layout_is_tab_indented_with_trailing_newline() {
        let json = I18nJson::from_dictionary(&dict(&[
            ("greeting", "Hello", ""),
            ("farewell", "Bye", "Tschüss"),
        ]));
        assert_eq!(
            json.render().unwrap(),
            "{\n\t\"greeting\": \"Hello\",\n\t\"farewell\": \"Tschüss\"\n}\n"
        );
    }

    #[test]
    fn test_empty_dictionary() {
        let json = I18nJson::from_dictionary(&TranslationDictionary::new());
        assert_eq!(json.render().unwrap(), "{}\n");
    }

    #[test]
    fn test_values_are_json_escaped() {
        let json = I18nJson::from_dictionary(&dict(&[
            ("q", r#"He said "hi""#, ""),
            ("bs", "It\\'s", ""),
        ]));
        let text = json.render().unwrap();
        assert!(text.contains(r#""q": "He said \"hi\"""#));
        assert!(text.contains(r#""bs": "It\\'s""#));
        let back = I18nJson::parse(&text).unwrap();
        assert_eq!(back.dictionary.get("q"), Some(r#"He said "hi""#));
    }

    #[test]
    fn test_reading_back_keeps_order() {
        let json = I18nJson::from_dictionary(&dict(&[("z", "Z", ""), ("a", "A", "Ä")]));
        let back = I18nJson::parse(&json.render().unwrap()).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            i18n_json_file_name("localizedConstants.deu.xlf"),
            "localizedConstants.i18n.json"
        );
        assert_eq!(i18n_json_file_name("dialogs.xlf"), "dialogs.i18n.json");
        assert_eq!(i18n_json_file_name("noext"), "noext.i18n.json");
    }
}
