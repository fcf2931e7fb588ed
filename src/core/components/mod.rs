pub mod module;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use module::{Module, ModuleKind, ModuleState};
pub use registry::{ModuleCounts, ModuleRegistry};
pub use types::NetworkError;
