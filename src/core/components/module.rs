use crate::core::components::types::NetworkError;
use crate::core::event::Level;
use crate::core::types::ModuleKey;

/// The three kinds of module a network can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Broadcaster,
    FlipFlop,
    Conjunction,
}

impl ModuleKind {
    /// Type sigil used in the network description
    pub fn from_sigil(sigil: char) -> Option<Self> {
        match sigil {
            '%' => Some(ModuleKind::FlipFlop),
            '&' => Some(ModuleKind::Conjunction),
            _ => None,
        }
    }
}

/// Variant-specific reaction state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleState {
    Broadcaster,
    FlipFlop { on: bool },
    Conjunction {
        inputs: Vec<ModuleKey>,
        memory: Vec<Level>,
    },
}

/// One node of the pulse network
///
/// A module owns its output list and its own reaction state. It never touches
/// other modules or the pulse queue: `set_input` returns the level to send to
/// every output and the dispatcher does the fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    key: ModuleKey,
    outputs: Vec<ModuleKey>,
    state: ModuleState,
}

impl Module {
    pub fn new(kind: ModuleKind, key: ModuleKey, outputs: Vec<ModuleKey>) -> Self {
        let state = match kind {
            ModuleKind::Broadcaster => ModuleState::Broadcaster,
            ModuleKind::FlipFlop => ModuleState::FlipFlop { on: false },
            ModuleKind::Conjunction => ModuleState::Conjunction {
                inputs: Vec::new(),
                memory: Vec::new(),
            },
        };
        Self {
            key,
            outputs,
            state,
        }
    }

    pub fn key(&self) -> ModuleKey {
        self.key
    }

    pub fn kind(&self) -> ModuleKind {
        match self.state {
            ModuleState::Broadcaster => ModuleKind::Broadcaster,
            ModuleState::FlipFlop { .. } => ModuleKind::FlipFlop,
            ModuleState::Conjunction { .. } => ModuleKind::Conjunction,
        }
    }

    pub fn outputs(&self) -> &[ModuleKey] {
        &self.outputs
    }

    pub fn state(&self) -> &ModuleState {
        &self.state
    }

    /// Registered predecessors. Only conjunctions remember them.
    pub fn inputs(&self) -> &[ModuleKey] {
        match &self.state {
            ModuleState::Conjunction { inputs, .. } => inputs.as_slice(),
            _ => &[],
        }
    }

    /// Register a predecessor during the wiring pass
    pub fn add_input(&mut self, source: ModuleKey) {
        if let ModuleState::Conjunction { inputs, memory } = &mut self.state {
            if !inputs.contains(&source) {
                inputs.push(source);
                memory.push(Level::Low);
            }
        }
    }

    /// Apply the reaction rule to a pulse from `source`.
    ///
    /// Returns the level sent to every output, or `None` when the module stays
    /// silent (a flip-flop receiving a high pulse).
    pub fn set_input(
        &mut self,
        source: ModuleKey,
        level: Level,
    ) -> Result<Option<Level>, NetworkError> {
        match &mut self.state {
            ModuleState::Broadcaster => Ok(Some(level)),
            ModuleState::FlipFlop { on } => {
                if level.is_high() {
                    return Ok(None);
                }
                *on = !*on;
                Ok(Some(if *on { Level::High } else { Level::Low }))
            }
            ModuleState::Conjunction { inputs, memory } => {
                let index = inputs
                    .iter()
                    .position(|&k| k == source)
                    .ok_or(NetworkError::UnwiredInput {
                        module: self.key,
                        source,
                    })?;
                memory[index] = level;

                if memory.iter().all(Level::is_high) {
                    Ok(Some(Level::Low))
                } else {
                    Ok(Some(Level::High))
                }
            }
        }
    }

    /// Restore the initial state, keeping outputs and registered inputs
    pub fn reset(&mut self) {
        match &mut self.state {
            ModuleState::Broadcaster => {}
            ModuleState::FlipFlop { on } => *on = false,
            ModuleState::Conjunction { memory, .. } => {
                memory.iter_mut().for_each(|level| *level = Level::Low);
            }
        }
    }
}
