use super::types::ModuleKey;
use serde::{Deserialize, Serialize};

/// Signal level carried by a pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn is_high(&self) -> bool {
        matches!(self, Level::High)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Low => write!(f, "low"),
            Level::High => write!(f, "high"),
        }
    }
}

/// A pulse in flight along one wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub source: ModuleKey,
    pub level: Level,
    pub destination: ModuleKey,
}

impl Pulse {
    pub fn new(source: ModuleKey, level: Level, destination: ModuleKey) -> Self {
        Self {
            source,
            level,
            destination,
        }
    }
}

impl std::fmt::Display for Pulse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -{}-> {}", self.source, self.level, self.destination)
    }
}
