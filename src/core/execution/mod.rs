pub mod config;
pub mod dispatcher;
pub mod simulation_engine;

// Re-export commonly used types
pub use config::SimulationConfig;
pub use dispatcher::{Dispatcher, PressReport, PulseCounts};
pub use simulation_engine::{PulseObserver, PulseSimulation};
