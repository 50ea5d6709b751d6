//! Application services - orchestration of domain logic through ports.

pub mod verification_service;

pub use verification_service::{VerificationOutcome, VerificationService};
