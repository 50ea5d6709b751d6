//! Infrastructure adapters for platcheck.
//!
//! This crate implements the ports defined in `platcheck_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod descriptor_loader;
pub mod probe;
pub mod settings_loader;

// Re-export commonly used adapters
pub use descriptor_loader::FsDescriptorSource;
pub use probe::{LocalDirProbe, MemoryDirProbe};
pub use settings_loader::{ProjectSettings, SettingsDefaults, load_settings};
