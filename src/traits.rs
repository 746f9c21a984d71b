//! Traits for reading inputs and writing generated artifacts.

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// A trait for anything that can be read from one file.
///
/// # Example
///
/// ```rust,no_run
/// use xliffnls::traits::Parser;
/// let doc = xliffnls::formats::XliffDocument::read_from("localizedConstants.enu.xlf")?;
/// println!("{} units", doc.units.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    ///
    /// A UTF-8/UTF-16 byte order mark is detected and the content decoded to UTF-8.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);
        Self::from_reader(BufReader::new(decoder))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}

/// A generated text artifact.
pub trait Generator {
    /// Write the artifact to any writer.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write the artifact to a file, creating missing parent directories and
    /// overwriting whatever was there before.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush().map_err(Error::Io)
    }

    /// Render the artifact into a string.
    fn render(&self) -> Result<String, Error> {
        let mut out = Vec::new();
        self.to_writer(&mut out)?;
        String::from_utf8(out).map_err(|e| Error::InvalidResource(e.to_string()))
    }
}
