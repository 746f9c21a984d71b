#![forbid(unsafe_code)]
//! Build-time localization toolkit for XLIFF translation files.
//!
//! Reads XLIFF `<trans-unit>` records into a [`TranslationDictionary`] and renders three kinds
//! of artifacts from it:
//!
//! - **`*.i18n.json`**: flat id → string dictionaries, target text with source fallback
//! - **`localizedConstants.ts`**: generated constants plus a locale-aware reload function
//! - **`package.nls*.json`**: package metadata, English first, then every other locale merged
//!   against the English keys
//!
//! # Quick Start
//!
//! ```rust
//! use xliffnls::{EscapeMode, I18nJson, PackageNls, extract_dictionary, traits::Generator};
//!
//! let xml = r#"<xliff><file><body>
//!   <trans-unit id="greeting"><source>Hello</source><target></target></trans-unit>
//! </body></file></xliff>"#;
//!
//! let dict = extract_dictionary(xml, EscapeMode::SingleQuote)?;
//! assert_eq!(I18nJson::from_dictionary(&dict).render()?, "{\n\t\"greeting\": \"Hello\"\n}\n");
//!
//! let english = extract_dictionary(xml, EscapeMode::Verbatim)?;
//! assert_eq!(PackageNls::generate(&english).file_name(), "package.nls.json");
//! # Ok::<(), xliffnls::Error>(())
//! ```
//!
//! File discovery and task ordering belong to the caller; see the `xliffnls` CLI.

pub mod error;
pub mod escape;
pub mod formats;
pub mod layout;
pub mod locale;
pub mod naming;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    escape::{EscapeMode, escape, escape_quotes},
    formats::{
        ArtifactKind, ConstantsModule, I18nJson, PackageNls, XliffDocument,
        xliff::extract_dictionary,
    },
    layout::ProjectLayout,
    locale::{Locale, public_locale_tag},
    types::{ReferenceKeySet, ResolvedDictionary, TranslationDictionary, TranslationEntry},
};
