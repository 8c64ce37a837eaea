//! File I/O, validation, and artifact writing for the arbor pipeline.
//!
//! Reads the attribute header and example rows that feed
//! [`arbor_id3::Id3Config::fit`], lays out a finished tree for drawing, and
//! writes JSON and Graphviz artifacts.

mod attribute_reader;
mod experiment;
mod error;
mod layout;
mod reader;
mod writer;

pub use attribute_reader::AttributeReader;
pub use experiment::ExperimentName;
pub use error::IoError;
pub use layout::{layout, LayoutKind, LayoutNode};
pub use reader::ExampleReader;
pub use writer::ResultWriter;
