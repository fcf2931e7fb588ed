use crate::core::components::module::{Module, ModuleKind};
use crate::core::components::registry::ModuleRegistry;
use crate::core::components::types::NetworkError;
use crate::core::types::ModuleKey;
use log::info;

const ARROW: &str = "->";

/// Imperative API for describing a pulse network
///
/// Modules are added either directly or by parsing description lines of the
/// form `<sigil?><name> -> <name>[, <name>]*`, where the sigil is `%` for a
/// flip-flop, `&` for a conjunction and absent for a broadcaster. `build`
/// registers every module and runs the wiring pass.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    modules: Vec<Module>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole description. Blank lines are skipped.
    pub fn from_lines<'a, I>(lines: I) -> Result<Self, NetworkError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut builder = Self::new();
        for (index, line) in lines.into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            builder.parse_line(index + 1, line)?;
        }
        Ok(builder)
    }

    /// Parse a whole description held in one string
    pub fn from_text(text: &str) -> Result<Self, NetworkError> {
        Self::from_lines(text.lines())
    }

    /// Add a module directly
    pub fn add_module(&mut self, kind: ModuleKind, name: &str, outputs: &[&str]) -> ModuleKey {
        let key = ModuleKey::encode(name);
        let outputs = outputs.iter().map(|o| ModuleKey::encode(o)).collect();
        self.modules.push(Module::new(kind, key, outputs));
        key
    }

    /// Parse one description line; `line_number` is only used for errors
    pub fn parse_line(&mut self, line_number: usize, line: &str) -> Result<ModuleKey, NetworkError> {
        let parse_error = |message: String| NetworkError::Parse {
            line: line_number,
            message,
        };

        let (head, tail) = line
            .trim()
            .split_once(ARROW)
            .ok_or_else(|| parse_error(format!("missing '{}' in '{}'", ARROW, line.trim())))?;

        let head = head.trim();
        let mut chars = head.chars();
        let (kind, name) = match chars.next().and_then(ModuleKind::from_sigil) {
            Some(kind) => (kind, chars.as_str()),
            None => (ModuleKind::Broadcaster, head),
        };
        validate_name(name).map_err(|msg| parse_error(format!("module {}", msg)))?;

        let mut outputs = Vec::new();
        for output in tail.split(',') {
            let output = output.trim();
            validate_name(output).map_err(|msg| parse_error(format!("output {}", msg)))?;
            outputs.push(output);
        }

        Ok(self.add_module(kind, name, &outputs))
    }

    /// Register all modules and wire conjunction inputs
    pub fn build(self) -> Result<ModuleRegistry, NetworkError> {
        let mut registry = ModuleRegistry::new();
        for module in self.modules {
            registry.register_module(module)?;
        }
        registry.wire_inputs();

        let counts = registry.counts();
        info!(
            "Built network with {} modules ({} flip-flops, {} conjunctions)",
            counts.total, counts.flip_flops, counts.conjunctions
        );

        Ok(registry)
    }
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if let Some(c) = name.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(format!("name '{}' contains invalid character '{}'", name, c));
    }
    Ok(())
}
