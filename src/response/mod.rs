//! Response helpers

pub mod envelope;

pub use envelope::envelope;
