//! Just enough JSON-LD for the entity store.

mod json_ld;
mod values;

pub mod vocab;

pub use json_ld::JsonLdValue;
pub use values::EntityValues;
