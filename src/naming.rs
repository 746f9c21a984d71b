//! File-name conventions of the XLIFF tree.
//!
//! Package metadata sources are named `localizedPackage.json.<code>.xlf`. The code is read once
//! here and passed on as a [`Locale`]; generators never look at file names.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::Error, locale::Locale};

lazy_static! {
    static ref PACKAGE_XLIFF_REGEX: Regex =
        Regex::new(r"^localizedPackage\.json\.([^.]+)\.(?:.*\.)?xlf$").unwrap();
}

/// Reads the locale code out of a package metadata source name.
///
/// ```rust
/// use xliffnls::{Locale, naming::locale_from_package_xliff_name};
/// assert_eq!(locale_from_package_xliff_name("localizedPackage.json.chs.xlf")?, Locale::Chs);
/// # Ok::<(), xliffnls::Error>(())
/// ```
pub fn locale_from_package_xliff_name(file_name: &str) -> Result<Locale, Error> {
    let code = PACKAGE_XLIFF_REGEX
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| {
            Error::InvalidFileName(format!(
                "`{file_name}` is not named localizedPackage.json.<locale>.xlf"
            ))
        })?;
    code.as_str().parse()
}
