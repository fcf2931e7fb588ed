pub mod core;

// Re-export commonly used types
pub use crate::core::analysis::period::PeriodAnalyzer;
pub use crate::core::builder::network_builder::NetworkBuilder;
pub use crate::core::components::types::NetworkError;
pub use crate::core::event::{Level, Pulse};
pub use crate::core::execution::config::SimulationConfig;
pub use crate::core::execution::simulation_engine::{PulseObserver, PulseSimulation};
pub use crate::core::types::ModuleKey;
