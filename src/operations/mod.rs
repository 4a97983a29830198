//! Operation groups, one module per API namespace.
//!
//! Each group is a set of free functions composed over the shared
//! transport; no group holds state of its own.

pub mod multipart;
pub mod objects;
pub mod supplychain;
