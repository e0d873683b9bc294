/// Parser for JaCoCo XML coverage reports.
///
/// JaCoCo XML structure:
///   <report name="...">
///     <sessioninfo id="..." start="..." dump="..."/>
///     <package name="com/example">
///       <class name="com/example/Foo" sourcefilename="Foo.java">
///         <method name="doStuff" desc="()V" line="10">
///           <counter type="INSTRUCTION" missed="0" covered="5"/>
///         </method>
///         <counter type="INSTRUCTION" missed="2" covered="10"/>
///       </class>
///       <sourcefile name="Foo.java">
///         <line nr="10" mi="0" ci="3" mb="0" cb="2"/>
///         <counter type="INSTRUCTION" missed="2" covered="10"/>
///         <counter type="LINE" missed="1" covered="5"/>
///       </sourcefile>
///       <counter type="INSTRUCTION" missed="2" covered="10"/>
///     </package>
///     <counter type="INSTRUCTION" missed="2" covered="10"/>
///   </report>
///
/// Only `report > package > sourcefile > counter` is read. Counters on
/// classes, methods, packages and the report itself repeat the same
/// instructions at a coarser level and are skipped, as are `<group>`
/// wrappers and `<line>` detail.
///
/// Counter values and package names are stored as written. Whether they are
/// valid only matters for files the exclusion filter keeps, so that check
/// happens during aggregation. A `<sourcefile>` without a `name` always
/// fails the report.
use quick_xml::events::{BytesStart, Event};

use super::{get_attr, xml_err, ReportParser};
use crate::error::{Error, Result};
use crate::model::*;

/// JaCoCo XML format parser.
pub struct JacocoParser;

impl ReportParser for JacocoParser {
    fn parse(&self, input: &[u8]) -> Result<CoverageReport> {
        parse(input)
    }
}

/// Parse JaCoCo XML coverage data from raw bytes.
pub fn parse(input: &[u8]) -> Result<CoverageReport> {
    let mut xml = super::xml_reader(input);
    let mut buf = Vec::new();

    let mut state = State::new();

    // Names of the currently open elements, outermost first.
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut seen_root = false;

    loop {
        let event = xml.read_event_into(&mut buf);
        let is_start_event = matches!(&event, Ok(Event::Start(_)));
        match event {
            Err(e) => return Err(xml_err(e, &xml)),
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = e.name().as_ref().to_vec();
                match (stack.len(), name.as_slice()) {
                    (1, b"package") => {
                        state.package = Some(Package::new(get_attr(e, b"name")));
                    }
                    (2, b"sourcefile") if stack[1] == b"package" => {
                        let file_name = required_attr(e, "sourcefile", "name")?;
                        state.sourcefile = Some(SourceFile::new(file_name));
                    }
                    (3, b"counter") if stack[1] == b"package" && stack[2] == b"sourcefile" => {
                        if let (Some(file), Some(counter)) =
                            (state.sourcefile.as_mut(), read_counter(e))
                        {
                            file.counters.push(counter);
                        }
                    }
                    _ => {}
                }

                seen_root = true;
                if is_start_event {
                    stack.push(name);
                } else {
                    // Self-closing element: no End event will follow.
                    state.close(&name, stack.len() + 1);
                }
            }
            Ok(Event::End(ref e)) => {
                let depth = stack.len();
                stack.pop();
                state.close(e.name().as_ref(), depth);
            }
            _ => {}
        }
        buf.clear();
    }

    if !seen_root || !stack.is_empty() {
        let open = stack
            .last()
            .map(|n| String::from_utf8_lossy(n).into_owned())
            .unwrap_or_else(|| "report".to_string());
        return Err(xml_err(quick_xml::Error::UnexpectedEof(open), &xml));
    }

    Ok(state.report)
}

struct State {
    report: CoverageReport,
    package: Option<Package>,
    sourcefile: Option<SourceFile>,
}

impl State {
    fn new() -> Self {
        Self {
            report: CoverageReport::new(),
            package: None,
            sourcefile: None,
        }
    }

    /// Finish the element `name` that was open at `depth` (root = 1).
    fn close(&mut self, name: &[u8], depth: usize) {
        match (depth, name) {
            (2, b"package") => {
                if let Some(pkg) = self.package.take() {
                    self.report.packages.push(pkg);
                }
            }
            (3, b"sourcefile") => {
                if let (Some(pkg), Some(file)) = (self.package.as_mut(), self.sourcefile.take()) {
                    pkg.source_files.push(file);
                }
            }
            _ => {}
        }
    }
}

fn required_attr(
    e: &BytesStart,
    element: &'static str,
    attribute: &'static str,
) -> Result<String> {
    get_attr(e, attribute.as_bytes()).ok_or(Error::MissingAttribute { element, attribute })
}

/// Read a `<counter>`. Counters without a `type` are ignored.
fn read_counter(e: &BytesStart) -> Option<Counter> {
    let kind = CounterType::from_attr(&get_attr(e, b"type")?);
    Some(Counter {
        kind,
        missed: get_attr(e, b"missed"),
        covered: get_attr(e, b"covered"),
    })
}
