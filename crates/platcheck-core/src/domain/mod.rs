//! Core domain layer for platcheck.
//!
//! Pure business logic with no I/O: version values, requirement tables,
//! descriptor records, and the verification engine. Everything here is
//! a total function of its inputs; filesystem and parsing concerns live
//! behind the ports defined in the application layer.
//!
//! ## Hexagonal architecture compliance
//!
//! - **No async**: verification is synchronous
//! - **No I/O**: no filesystem, network, or external calls
//! - **No shared state**: every value is constructed fresh per run;
//!   nothing persists between invocations

pub mod config;
pub mod descriptor;
pub mod error;
pub mod requirements;
pub mod verifier;
pub mod version;

// Re-exports for convenience
pub use config::{CompilerConfig, RawCompilerConfig, RawSecondaryToolchain, SecondaryToolchain};
pub use descriptor::Descriptor;
pub use error::{DomainError, ErrorCategory};
pub use requirements::{RequirementTable, RequirementTables};
pub use verifier::{CompatibilityVerifier, Diagnostic, DiagnosticKind, render_warning};
pub use version::Version;
