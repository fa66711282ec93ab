//! JSON import/export of the entity graph.

mod json;

#[cfg(test)]
mod json_tests;

pub use json::{export_json, import_json};
