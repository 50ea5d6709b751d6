//! Directory-probe implementations of the `DirProbe` port.

pub mod local;
pub mod memory;

pub use local::LocalDirProbe;
pub use memory::MemoryDirProbe;
