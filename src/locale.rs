//! The closed set of locales the XLIFF sources are delivered in.
//!
//! Translation vendors name locales with three-letter codes (`chs`, `ptb`, ...), while the
//! generated `package.nls.<tag>.json` files use the public tag VS Code expects (`zh-cn`,
//! `pt-br`, ...). [`Locale`] is the only place where the two are tied together.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// A supported locale, identified by its three-letter vendor code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    Chs,
    Cht,
    Csy,
    Deu,
    Enu,
    Esn,
    Fra,
    Hun,
    Ita,
    Jpn,
    Kor,
    Nld,
    Plk,
    Ptb,
    Ptg,
    Rus,
    Sve,
    Trk,
}

impl Locale {
    /// Every supported locale, in code order.
    pub const ALL: [Locale; 18] = [
        Locale::Chs,
        Locale::Cht,
        Locale::Csy,
        Locale::Deu,
        Locale::Enu,
        Locale::Esn,
        Locale::Fra,
        Locale::Hun,
        Locale::Ita,
        Locale::Jpn,
        Locale::Kor,
        Locale::Nld,
        Locale::Plk,
        Locale::Ptb,
        Locale::Ptg,
        Locale::Rus,
        Locale::Sve,
        Locale::Trk,
    ];

    /// The original-language locale. Its values are the fallback for every other locale.
    pub const DEFAULT: Locale = Locale::Enu;

    /// The three-letter vendor code, e.g. `"chs"`.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Chs => "chs",
            Locale::Cht => "cht",
            Locale::Csy => "csy",
            Locale::Deu => "deu",
            Locale::Enu => "enu",
            Locale::Esn => "esn",
            Locale::Fra => "fra",
            Locale::Hun => "hun",
            Locale::Ita => "ita",
            Locale::Jpn => "jpn",
            Locale::Kor => "kor",
            Locale::Nld => "nld",
            Locale::Plk => "plk",
            Locale::Ptb => "ptb",
            Locale::Ptg => "ptg",
            Locale::Rus => "rus",
            Locale::Sve => "sve",
            Locale::Trk => "trk",
        }
    }

    /// The public locale tag used in output file names, e.g. `"zh-cn"`.
    pub fn public_tag(self) -> &'static str {
        match self {
            Locale::Chs => "zh-cn",
            Locale::Cht => "zh-tw",
            Locale::Csy => "cs-cz",
            Locale::Deu => "de",
            Locale::Enu => "en",
            Locale::Esn => "es",
            Locale::Fra => "fr",
            Locale::Hun => "hu",
            Locale::Ita => "it",
            Locale::Jpn => "ja",
            Locale::Kor => "ko",
            Locale::Nld => "nl",
            Locale::Plk => "pl",
            Locale::Ptb => "pt-br",
            Locale::Ptg => "pt",
            Locale::Rus => "ru",
            Locale::Sve => "sv-se",
            Locale::Trk => "tr",
        }
    }

    pub fn is_default(self) -> bool {
        self == Locale::DEFAULT
    }

    /// The public tag as a parsed BCP-47 identifier.
    pub fn language_identifier(self) -> LanguageIdentifier {
        self.public_tag().parse().unwrap_or_default()
    }

    /// Looks a locale up by its public tag.
    ///
    /// Matching goes through [`LanguageIdentifier`], so `pt-BR`, `pt_br` and `pt-br` all
    /// resolve to [`Locale::Ptb`].
    pub fn from_public_tag(tag: &str) -> Result<Locale, Error> {
        let wanted: LanguageIdentifier = tag
            .trim()
            .parse()
            .map_err(|_| Error::UnknownLocale(tag.to_string()))?;
        Locale::ALL
            .into_iter()
            .find(|locale| locale.language_identifier() == wanted)
            .ok_or_else(|| Error::UnknownLocale(tag.to_string()))
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Parses a three-letter vendor code (case-insensitive).
///
/// Codes outside the table are rejected with [`Error::UnknownLocale`].
impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Locale::ALL
            .into_iter()
            .find(|locale| locale.code() == code)
            .ok_or_else(|| Error::UnknownLocale(s.to_string()))
    }
}

/// Maps a three-letter vendor code straight to its public tag.
///
/// # Example
/// ```rust
/// assert_eq!(xliffnls::public_locale_tag("chs").unwrap(), "zh-cn");
/// assert!(xliffnls::public_locale_tag("xyz").is_err());
/// ```
pub fn public_locale_tag(code: &str) -> Result<&'static str, Error> {
    code.parse::<Locale>().map(Locale::public_tag)
}
