//! Hash states for `TypeId` keys, re-exports *hashbrown*.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{NoOpHashState, NoOpHasher};

// -----------------------------------------------------------------------------
// Re-export crates

pub use hashbrown;
