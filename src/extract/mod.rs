//! Field extraction engine
//!
//! Turns a listing's free-text title and description into the structured
//! attribute record. Extraction is pure pattern matching: an ordered table
//! of declarative rules, one per target field, interpreted by a single
//! generic evaluator. No I/O happens here.

mod record;
mod rules;

pub use record::{Attributes, Field, ListingRecord};
pub use rules::{Normalize, Ruleset, Target};
