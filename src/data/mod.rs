//! Launch data loading.

pub mod loader;

pub use loader::Dataset;
