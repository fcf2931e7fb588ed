use crate::core::types::ModuleKey;

/// Error types for building, running and analysing a pulse network
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// A description line does not match `<sigil?><name> -> <name>[, <name>]*`
    Parse { line: usize, message: String },
    /// Two module definitions share a key
    DuplicateModule(ModuleKey),
    /// Module not registered in the network
    ModuleNotFound(ModuleKey),
    /// A conjunction received a pulse from a source the wiring pass never registered
    UnwiredInput { module: ModuleKey, source: ModuleKey },
    /// Conjunction inputs disagree with the module outputs feeding them
    Inconsistent(String),
    /// The network does not have the shape the period analyzer relies on
    UnsupportedStructure(String),
    /// Reading the network description failed
    Io(String),
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::Parse { line, message } => {
                write!(f, "Parse error on line {}: {}", line, message)
            }
            NetworkError::DuplicateModule(key) => {
                write!(f, "Module '{}' is defined more than once", key)
            }
            NetworkError::ModuleNotFound(key) => write!(f, "Module not found: {}", key),
            NetworkError::UnwiredInput { module, source } => write!(
                f,
                "Conjunction '{}' received a pulse from unwired source '{}'",
                module, source
            ),
            NetworkError::Inconsistent(msg) => write!(f, "Inconsistent wiring: {}", msg),
            NetworkError::UnsupportedStructure(msg) => {
                write!(f, "Structure not supported: {}", msg)
            }
            NetworkError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<std::io::Error> for NetworkError {
    fn from(err: std::io::Error) -> Self {
        NetworkError::Io(err.to_string())
    }
}
