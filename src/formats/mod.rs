//! Input and output formats of xliffnls.
//!
//! [`xliff`] is the only input. Every other module renders one artifact from a
//! [`TranslationDictionary`](crate::types::TranslationDictionary); [`ArtifactKind`] names them.

pub mod constants;
pub mod i18n_json;
pub mod package_nls;
pub mod xliff;

// Reexporting the formats for easier access
pub use constants::ConstantsModule;
pub use i18n_json::I18nJson;
pub use package_nls::PackageNls;
pub use xliff::{TransUnit, XliffDocument};

use crate::escape::EscapeMode;

/// The artifacts that can be generated from XLIFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Flat `<stem>.i18n.json` dictionary, one per input file.
    I18nJson,
    /// The generated `localizedConstants.ts` module.
    Constants,
    /// `package.nls.json` / `package.nls.<tag>.json`.
    PackageNls,
}

impl ArtifactKind {
    /// How values must be escaped when extracted for this artifact.
    pub fn escape_mode(&self) -> EscapeMode {
        match self {
            ArtifactKind::I18nJson | ArtifactKind::Constants => EscapeMode::SingleQuote,
            ArtifactKind::PackageNls => EscapeMode::Verbatim,
        }
    }
}
