use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error at position {position}: {source}")]
    Xml {
        source: quick_xml::Error,
        position: usize,
    },

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("invalid INSTRUCTION counter value {attribute}=\"{value}\"")]
    InvalidCounter {
        attribute: &'static str,
        value: String,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("coverage threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
