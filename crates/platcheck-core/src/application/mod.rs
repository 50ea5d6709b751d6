//! Application layer - use case orchestration.
//!
//! Connects the pure domain to the outside world through ports. The
//! services here own no I/O of their own; adapters are injected as
//! trait objects.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::{DescriptorSource, DirProbe};
pub use services::{VerificationOutcome, VerificationService};
