//! A sparse bit set whose storage grows with the number of non-empty 64-bit
//! words rather than with its capacity.
//!
//! Storage is a single `Vec<u64>` holding a chain of metadata words followed
//! by the data words they announce. See [`layout`] for the encoding.

pub mod bitvector;
pub mod builder;
pub mod combine;
pub mod compare;
pub mod error;
pub mod iter;
pub mod layout;
pub mod reference;
pub mod sparsebitset;
mod utils;

pub use bitvector::BitVector;
pub use builder::SparseBitSetBuilder;
pub use combine::BitOp;
pub use error::{Error, Result};
pub use iter::Ones;
pub use reference::DenseBitSet;
pub use sparsebitset::SparseBitSet;
