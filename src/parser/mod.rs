//! Extraction phase of the templating engine

pub mod model;
pub(crate) mod scan;
mod select_body;

pub use model::*;
pub use scan::parse;
