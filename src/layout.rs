//! Where inputs are found and artifacts are written inside a project.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    error::Error,
    formats::{
        constants::{CONSTANTS_FILE_NAME, CONSTANTS_SOURCE_XLIFF},
        i18n_json::i18n_json_file_name,
        package_nls::{PACKAGE_NLS_FILE_NAME, PACKAGE_XLIFF_PREFIX, package_nls_file_name},
    },
    locale::Locale,
};

/// Project directory layout.
///
/// `localization_dir` and `constants_dir` are resolved against `root` when relative.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProjectLayout {
    /// Project root. Package metadata is written here.
    pub root: PathBuf,
    /// Directory holding `xliff/` and `i18n/`.
    pub localization_dir: PathBuf,
    /// Destination of the generated constants module.
    pub constants_dir: PathBuf,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            localization_dir: PathBuf::from("localization"),
            constants_dir: PathBuf::from("src/constants"),
        }
    }
}

impl ProjectLayout {
    /// Creates the default layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_localization_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.localization_dir = dir.into();
        self
    }

    pub fn with_constants_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.constants_dir = dir.into();
        self
    }

    pub fn localization_dir(&self) -> PathBuf {
        self.root.join(&self.localization_dir)
    }

    pub fn xliff_dir(&self) -> PathBuf {
        self.localization_dir().join("xliff")
    }

    pub fn i18n_dir(&self) -> PathBuf {
        self.localization_dir().join("i18n")
    }

    pub fn constants_dir(&self) -> PathBuf {
        self.root.join(&self.constants_dir)
    }

    /// The English XLIFF of the constants module.
    pub fn constants_source(&self) -> PathBuf {
        self.localization_dir().join(CONSTANTS_SOURCE_XLIFF)
    }

    pub fn constants_output_path(&self) -> PathBuf {
        self.constants_dir().join(CONSTANTS_FILE_NAME)
    }

    /// `xliff/<code>/localizedPackage.json.<code>.xlf`.
    pub fn package_xliff_source(&self, locale: Locale) -> PathBuf {
        self.xliff_dir()
            .join(locale.code())
            .join(format!("{PACKAGE_XLIFF_PREFIX}{}.xlf", locale.code()))
    }

    pub fn package_nls_output_path(&self, locale: Locale) -> PathBuf {
        self.root.join(package_nls_file_name(locale))
    }

    /// The English `package.nls.json` localized metadata is merged against.
    pub fn reference_path(&self) -> PathBuf {
        self.root.join(PACKAGE_NLS_FILE_NAME)
    }

    /// Mirrors an input below `xliff/` into `i18n/`, renaming it to `<stem>.i18n.json`.
    pub fn i18n_output_path(&self, input: &Path) -> Result<PathBuf, Error> {
        let xliff_dir = self.xliff_dir();
        let relative = input.strip_prefix(&xliff_dir).map_err(|_| {
            Error::InvalidFileName(format!(
                "{} is not below {}",
                input.display(),
                xliff_dir.display()
            ))
        })?;
        let file_name = relative
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidFileName(input.display().to_string()))?;
        let mut output = self.i18n_dir();
        if let Some(parent) = relative.parent() {
            output.push(parent);
        }
        output.push(i18n_json_file_name(file_name));
        Ok(output)
    }
}
