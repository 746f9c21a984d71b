//! All error types for the xliffnls crate.
//!
//! These are returned from all fallible operations (XML extraction, locale lookup, reading back
//! generated JSON, writing artifacts).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttribute(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("unknown locale code `{0}`")]
    UnknownLocale(String),

    #[error("invalid file name: {0}")]
    InvalidFileName(String),

    #[error("reference package metadata not found: {}", .0.display())]
    MissingReference(PathBuf),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(value: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttribute(value.to_string())
    }
}
