pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod locate;
pub mod model;
pub mod parsers;
pub mod report;
