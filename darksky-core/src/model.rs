//! Typed forecast aggregates.
//!
//! Each aggregate is built once from a JSON object by its `from_json`
//! constructor and never mutated afterwards. Constructors fail only when a
//! field the provider guarantees is missing or mistyped; everything else
//! decodes to `None`.

mod alert;
mod data_block;
mod data_point;
mod flag;
mod forecast;

pub use alert::Alert;
pub use data_block::DataBlock;
pub use data_point::DataPoint;
pub use flag::Flag;
pub use forecast::Forecast;
