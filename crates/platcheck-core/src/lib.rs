//! Platcheck Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the platcheck
//! compatibility verifier, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          platcheck-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │         (VerificationService)           │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: DescriptorSource,          │
//! │              DirProbe)                  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    platcheck-adapters (Infrastructure)  │
//! │  (FsDescriptorSource, LocalDirProbe)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Version, RequirementTables,           │
//! │   CompatibilityVerifier)                │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use platcheck_core::{
//!     application::VerificationService,
//!     domain::{CompatibilityVerifier, CompilerConfig, RawCompilerConfig},
//! };
//! # fn adapters() -> (Box<dyn platcheck_core::application::DescriptorSource>, Box<dyn platcheck_core::application::DirProbe>) { unimplemented!() }
//!
//! // 1. Resolve the raw settings into a typed configuration
//! let raw = RawCompilerConfig {
//!     platform_version: "2023.1".into(),
//!     platform_build: "231.8109.175".into(),
//!     source_level: "17".into(),
//!     target_level: "17".into(),
//!     secondary: None,
//!     download_dir: PathBuf::from("/cache/platforms"),
//!     legacy_download_dir: PathBuf::from("/cache/legacy"),
//! };
//! let config = CompilerConfig::from_raw(raw).unwrap();
//!
//! // 2. Use the application service (with injected adapters)
//! let (descriptors, probe) = adapters();
//! let service = VerificationService::new(descriptors, probe, CompatibilityVerifier::default());
//! let outcome = service.run(&config, &[PathBuf::from("plugin.plugin.toml")]);
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        VerificationOutcome, VerificationService,
        ports::{DescriptorSource, DirProbe},
    };
    pub use crate::domain::{
        CompatibilityVerifier, CompilerConfig, Descriptor, Diagnostic, DiagnosticKind,
        RawCompilerConfig, RawSecondaryToolchain, RequirementTable, RequirementTables,
        SecondaryToolchain, Version, render_warning,
    };
    pub use crate::error::{PlatcheckError, PlatcheckResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
