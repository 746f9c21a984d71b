//! Support for XLIFF 1.2 translation files.
//!
//! Only `<trans-unit>` records are read: the `id` attribute plus the text of the first `<source>`
//! and `<target>` inside the unit. Inline markup inside those elements is flattened to its text,
//! the way a DOM `textContent` would.

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{BufRead, Write};

use crate::{
    error::Error,
    escape::{EscapeMode, escape},
    traits::{Generator, Parser},
    types::{TranslationDictionary, TranslationEntry},
};

const XLIFF_NAMESPACE: &str = "urn:oasis:names:tc:xliff:document:1.2";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XliffDocument {
    /// Units in document order. Repeated ids are kept here; they collapse in the dictionary.
    pub units: Vec<TransUnit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransUnit {
    pub id: String,
    pub source: Option<String>,
    pub target: Option<String>,
}

impl TransUnit {
    fn to_entry(&self, mode: EscapeMode) -> TranslationEntry {
        TranslationEntry {
            id: self.id.clone(),
            source: escape(self.source.as_deref().unwrap_or_default(), mode).into_owned(),
            target: escape(self.target.as_deref().unwrap_or_default(), mode).into_owned(),
        }
    }
}

impl XliffDocument {
    /// Builds the dictionary of this document, escaping every value once with `mode`.
    ///
    /// Missing `<source>` / `<target>` elements become empty strings. For repeated ids the last
    /// unit wins and the entry stays where the id first appeared.
    pub fn to_dictionary(&self, mode: EscapeMode) -> TranslationDictionary {
        self.units.iter().map(|unit| unit.to_entry(mode)).collect()
    }
}

/// Parses `xml` and returns its dictionary, escaped with `mode`.
///
/// ```rust
/// use xliffnls::{EscapeMode, extract_dictionary};
/// let xml = r#"<xliff><file><body>
///     <trans-unit id="greeting"><source>Don't</source></trans-unit>
/// </body></file></xliff>"#;
/// let dict = extract_dictionary(xml, EscapeMode::SingleQuote)?;
/// assert_eq!(dict.get("greeting").unwrap().source, "Don\\'t");
/// assert_eq!(dict.get("greeting").unwrap().target, "");
/// # Ok::<(), xliffnls::Error>(())
/// ```
pub fn extract_dictionary(xml: &str, mode: EscapeMode) -> Result<TranslationDictionary, Error> {
    Ok(XliffDocument::from_str(xml)?.to_dictionary(mode))
}

impl Parser for XliffDocument {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut document = XliffDocument::default();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"trans-unit" => {
                    let id = read_id(e)?;
                    let unit = parse_trans_unit(id, &mut xml_reader)?;
                    document.units.push(unit);
                }
                Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"trans-unit" => {
                    document.units.push(TransUnit {
                        id: read_id(e)?,
                        ..Default::default()
                    });
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }
        Ok(document)
    }
}

impl Generator for XliffDocument {
    /// Write a minimal XLIFF 1.2 document with one `<file>` holding every unit.
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        let mut xliff = BytesStart::new("xliff");
        xliff.push_attribute(("version", "1.2"));
        xliff.push_attribute(("xmlns", XLIFF_NAMESPACE));
        xml_writer.write_event(Event::Start(xliff))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        let mut file = BytesStart::new("file");
        file.push_attribute(("original", ""));
        file.push_attribute(("datatype", "plaintext"));
        xml_writer.write_event(Event::Start(file))?;
        xml_writer.write_event(Event::Start(BytesStart::new("body")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        for unit in &self.units {
            let mut elem = BytesStart::new("trans-unit");
            elem.push_attribute(("id", unit.id.as_str()));
            xml_writer.write_event(Event::Start(elem))?;
            for (name, text) in [("source", &unit.source), ("target", &unit.target)] {
                if let Some(text) = text {
                    xml_writer.write_event(Event::Start(BytesStart::new(name)))?;
                    xml_writer.write_event(Event::Text(BytesText::new(text)))?;
                    xml_writer.write_event(Event::End(BytesEnd::new(name)))?;
                }
            }
            xml_writer.write_event(Event::End(BytesEnd::new("trans-unit")))?;
            xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("body")))?;
        xml_writer.write_event(Event::End(BytesEnd::new("file")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        xml_writer.write_event(Event::End(BytesEnd::new("xliff")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }
}

fn read_id(e: &BytesStart) -> Result<String, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.as_ref() == b"id" {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::InvalidResource("trans-unit missing 'id'".to_string()))
}

/// Reads the body of a `<trans-unit>` up to and including its end tag.
fn parse_trans_unit<R: BufRead>(
    id: String,
    xml_reader: &mut Reader<R>,
) -> Result<TransUnit, Error> {
    let mut unit = TransUnit {
        id,
        ..Default::default()
    };
    let mut depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"source" if unit.source.is_none() => {
                    unit.source = Some(read_text_content(xml_reader)?);
                }
                b"target" if unit.target.is_none() => {
                    unit.target = Some(read_text_content(xml_reader)?);
                }
                _ => depth += 1,
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"source" if unit.source.is_none() => unit.source = Some(String::new()),
                b"target" if unit.target.is_none() => unit.target = Some(String::new()),
                _ => {}
            },
            Ok(Event::End(_)) if depth == 0 => break,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => {
                return Err(Error::InvalidResource(format!(
                    "unexpected EOF inside trans-unit '{}'",
                    unit.id
                )));
            }
            Ok(_) => (),
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
    Ok(unit)
}

/// Concatenates all text below the element that was just opened, consuming its end tag.
fn read_text_content<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut content = String::new();
    let mut depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => content.push_str(&e.unescape().map_err(Error::XmlParse)?),
            Ok(Event::CData(e)) => {
                let text = std::str::from_utf8(&e)
                    .map_err(|err| Error::InvalidResource(format!("CDATA is not UTF-8: {err}")))?;
                content.push_str(text);
            }
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) if depth == 0 => break,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => return Err(Error::InvalidResource("Unexpected EOF".to_string())),
            Ok(_) => (),
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
    Ok(content)
}
