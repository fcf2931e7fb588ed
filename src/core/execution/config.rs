//! Configuration for pulse network runs
//!
//! Controls how many button presses the counting run performs, which modules
//! serve as entry and terminal, and how far a brute-force search may go.

use crate::core::types::ModuleKey;
use serde::{Deserialize, Serialize};

/// Presses performed by the counting run
pub const DEFAULT_PRESSES: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of button presses for the counting run
    pub presses: u64,
    /// Module receiving the button pulse
    pub entry: String,
    /// Module whose first low pulse the period analysis predicts
    pub terminal: String,
    /// Upper bound for brute-force press searches; `None` disables them
    pub max_presses: Option<u64>,
}

impl SimulationConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            presses: DEFAULT_PRESSES,
            entry: "broadcaster".to_string(),
            terminal: "rx".to_string(),
            max_presses: None,
        }
    }

    pub fn with_presses(mut self, presses: u64) -> Self {
        self.presses = presses;
        self
    }

    pub fn with_entry(mut self, entry: &str) -> Self {
        self.entry = entry.to_string();
        self
    }

    pub fn with_terminal(mut self, terminal: &str) -> Self {
        self.terminal = terminal.to_string();
        self
    }

    /// Allow brute-force searches of up to `max` presses
    pub fn with_max_presses(mut self, max: u64) -> Self {
        self.max_presses = Some(max);
        self
    }

    pub fn entry_key(&self) -> ModuleKey {
        ModuleKey::encode(&self.entry)
    }

    pub fn terminal_key(&self) -> ModuleKey {
        ModuleKey::encode(&self.terminal)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
