//! Generated `localizedConstants.ts`.
//!
//! The module declares one `export let` per unit, initialized with the English source text, and
//! a `loadLocalizedConstants(locale)` function that re-assigns every constant through
//! `vscode-nls`. Values must come from a dictionary extracted with
//! [`EscapeMode::SingleQuote`](crate::escape::EscapeMode::SingleQuote) since they are pasted
//! into single-quoted literals.

use std::io::Write;

use crate::{error::Error, traits::Generator, types::TranslationDictionary};

/// Name of the generated file.
pub const CONSTANTS_FILE_NAME: &str = "localizedConstants.ts";

/// The English XLIFF the constants are generated from, relative to the localization directory.
pub const CONSTANTS_SOURCE_XLIFF: &str = "xliff/enu/constants/localizedConstants.enu.xlf";

const HEADER: [&str; 4] = [
    "/* tslint:disable */",
    "// THIS IS A COMPUTER GENERATED FILE. CHANGES IN THIS FILE WILL BE OVERWRITTEN.",
    "// TO ADD LOCALIZED CONSTANTS, ADD YOUR CONSTANT TO THE ENU XLIFF FILE UNDER ~/localization/xliff/enu/constants/localizedConstants.enu.xlf AND REBUILD THE PROJECT",
    "import * as nls from 'vscode-nls';",
];

const LINE_ENDING: &str = "\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantsModule {
    /// `(key, english value)` in document order.
    pub constants: Vec<(String, String)>,
}

impl ConstantsModule {
    pub fn from_dictionary(dict: &TranslationDictionary) -> Self {
        Self {
            constants: dict
                .iter()
                .map(|entry| (entry.id.clone(), entry.source.clone()))
                .collect(),
        }
    }

    fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = HEADER.iter().map(|l| l.to_string()).collect();
        for (key, value) in &self.constants {
            lines.push(format!("export let {key} = '{value}';"));
        }
        lines.push("export let loadLocalizedConstants = (locale: string) => {".to_string());
        lines.push("\tlet localize = nls.config({ locale: locale })();".to_string());
        for (key, value) in &self.constants {
            lines.push(format!("\t{key} = localize('{key}', '{value}');"));
        }
        lines.push("};".to_string());
        lines
    }
}

impl Generator for ConstantsModule {
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        for line in self.lines() {
            writer.write_all(line.as_bytes())?;
            writer.write_all(LINE_ENDING.as_bytes())?;
        }
        Ok(())
    }
}
