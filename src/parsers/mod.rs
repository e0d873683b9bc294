pub mod jacoco;

use quick_xml::events::BytesStart;
use quick_xml::reader::Reader;

use crate::error::{Error, Result};
use crate::model::CoverageReport;

/// Every report format parser implements this trait.
pub trait ReportParser {
    /// Parse the input bytes into our coverage model.
    fn parse(&self, input: &[u8]) -> Result<CoverageReport>;
}

pub(crate) fn xml_reader(input: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(input);
    reader.trim_text(true);
    reader
}

/// Attach the reader's byte offset to a quick-xml error.
pub(crate) fn xml_err<R>(source: quick_xml::Error, reader: &Reader<R>) -> Error {
    Error::Xml {
        source,
        position: reader.buffer_position(),
    }
}

/// Read a single attribute value by its local name.
pub(crate) fn get_attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}
