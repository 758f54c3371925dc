//! Set algebra over a bounded universe.
//!
//! Sets are fixed-width bit vectors over the index range
//! `[0, UNIVERSE_SIZE)`. The capacity is a build-time constant shared by
//! every component; all primitives run in O(`UNIVERSE_SIZE` / 64).
//!
//! # Key Types
//!
//! - [`Bitset`]: a set of universe elements
//! - [`Op`]: the three binary operators (union, intersection, difference)

mod bitset;
mod op;

pub use bitset::{Bitset, UNIVERSE_SIZE};
pub use op::{apply, Op};
