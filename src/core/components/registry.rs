use super::module::{Module, ModuleKind};
use super::types::NetworkError;
use crate::core::types::ModuleKey;
use std::collections::HashMap;

/// Owns every module of a network, indexed by key
///
/// Modules are registered once and then wired: `wire_inputs` tells every
/// conjunction which modules feed it. Wiring must happen before the first
/// pulse is dispatched.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: HashMap<ModuleKey, Module>,
    wired: bool,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module
    pub fn register_module(&mut self, module: Module) -> Result<(), NetworkError> {
        let key = module.key();

        if self.modules.contains_key(&key) {
            return Err(NetworkError::DuplicateModule(key));
        }

        self.modules.insert(key, module);
        self.wired = false;
        Ok(())
    }

    /// Register every module as an input of each defined module it outputs to.
    ///
    /// Outputs naming undefined modules are sinks and are skipped.
    pub fn wire_inputs(&mut self) {
        let edges: Vec<(ModuleKey, ModuleKey)> = self
            .modules
            .values()
            .flat_map(|module| {
                module
                    .outputs()
                    .iter()
                    .map(move |&target| (module.key(), target))
            })
            .collect();

        for (source, target) in edges {
            if let Some(module) = self.modules.get_mut(&target) {
                module.add_input(source);
            }
        }

        self.wired = true;
    }

    pub fn is_wired(&self) -> bool {
        self.wired
    }

    /// Get a module by key
    pub fn get_module(&self, key: &ModuleKey) -> Option<&Module> {
        self.modules.get(key)
    }

    /// Get a mutable module by key
    pub fn get_module_mut(&mut self, key: &ModuleKey) -> Option<&mut Module> {
        self.modules.get_mut(key)
    }

    pub fn has_module(&self, key: &ModuleKey) -> bool {
        self.modules.contains_key(key)
    }

    pub fn kind_of(&self, key: &ModuleKey) -> Option<ModuleKind> {
        self.modules.get(key).map(Module::kind)
    }

    /// Output list of a module, empty for sinks
    pub fn outputs(&self, key: &ModuleKey) -> &[ModuleKey] {
        self.modules
            .get(key)
            .map(Module::outputs)
            .unwrap_or(&[])
    }

    /// Every defined module that outputs to `key`, sorted by key
    pub fn inputs_of(&self, key: &ModuleKey) -> Vec<ModuleKey> {
        let mut inputs: Vec<ModuleKey> = self
            .modules
            .values()
            .filter(|module| module.outputs().contains(key))
            .map(Module::key)
            .collect();
        inputs.sort();
        inputs
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Restore every module's initial state without touching the wiring
    pub fn reset(&mut self) {
        for module in self.modules.values_mut() {
            module.reset();
        }
    }

    /// Get module count by kind
    pub fn counts(&self) -> ModuleCounts {
        let mut counts = ModuleCounts {
            total: self.modules.len(),
            ..ModuleCounts::default()
        };

        for module in self.modules.values() {
            match module.kind() {
                ModuleKind::Broadcaster => counts.broadcasters += 1,
                ModuleKind::FlipFlop => counts.flip_flops += 1,
                ModuleKind::Conjunction => counts.conjunctions += 1,
            }
        }

        counts
    }

    /// Check that every conjunction knows exactly the modules that feed it
    pub fn validate_consistency(&self) -> Result<(), NetworkError> {
        if !self.wired {
            return Err(NetworkError::Inconsistent(
                "inputs have not been wired".to_string(),
            ));
        }

        for module in self.modules.values() {
            if module.kind() != ModuleKind::Conjunction {
                continue;
            }

            let mut registered = module.inputs().to_vec();
            registered.sort();
            if registered != self.inputs_of(&module.key()) {
                return Err(NetworkError::Inconsistent(format!(
                    "conjunction '{}' has inputs {:?}, expected {:?}",
                    module.key(),
                    registered,
                    self.inputs_of(&module.key())
                )));
            }
        }

        Ok(())
    }
}

/// Statistics about module counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleCounts {
    pub total: usize,
    pub broadcasters: usize,
    pub flip_flops: usize,
    pub conjunctions: usize,
}
