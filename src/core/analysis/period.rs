use crate::core::components::module::ModuleKind;
use crate::core::components::registry::ModuleRegistry;
use crate::core::components::types::NetworkError;
use crate::core::types::ModuleKey;
use log::{debug, warn};
use std::collections::{HashSet, VecDeque};

/// Longest flip-flop chain whose period still fits in a `u64`
const MAX_CHAIN_LEN: usize = 63;

/// Period of one broadcaster branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPeriod {
    /// First flip-flop of the chain
    pub head: ModuleKey,
    /// Conjunction collecting the chain's outputs
    pub gate: ModuleKey,
    /// Presses between two low emissions of the gate
    pub period: u64,
}

/// Predicts the first press on which a terminal module receives a low pulse
///
/// Each successor of the broadcaster is expected to start a chain of
/// flip-flops acting as a binary counter. The chain positions that feed the
/// branch's conjunction spell out the counter value at which the conjunction
/// sees all-high inputs, so that value is the branch period. All branches must
/// line up at once, giving the least common multiple of their periods.
///
/// The shape is checked, not assumed: any branch that does not look like a
/// counter gated by one conjunction leading to the terminal is rejected with
/// `NetworkError::UnsupportedStructure`.
pub struct PeriodAnalyzer<'a> {
    registry: &'a ModuleRegistry,
    entry: ModuleKey,
    terminal: ModuleKey,
}

impl<'a> PeriodAnalyzer<'a> {
    pub fn new(registry: &'a ModuleRegistry, terminal: ModuleKey) -> Self {
        Self {
            registry,
            entry: ModuleKey::BROADCASTER,
            terminal,
        }
    }

    /// Use a module other than the broadcaster as the branch root
    pub fn with_entry(mut self, entry: ModuleKey) -> Self {
        self.entry = entry;
        self
    }

    /// Press count at which every branch fires together
    pub fn analyze(&self) -> Result<u64, NetworkError> {
        let periods: Vec<u64> = self
            .branch_periods()?
            .iter()
            .map(|branch| branch.period)
            .collect();
        lcm_all(&periods)
    }

    /// Period of every branch, in broadcaster output order
    pub fn branch_periods(&self) -> Result<Vec<BranchPeriod>, NetworkError> {
        match self.registry.kind_of(&self.entry) {
            Some(ModuleKind::Broadcaster) => {}
            Some(_) => {
                return Err(NetworkError::UnsupportedStructure(format!(
                    "entry '{}' is not a broadcaster",
                    self.entry
                )))
            }
            None => return Err(NetworkError::ModuleNotFound(self.entry)),
        }

        self.registry
            .outputs(&self.entry)
            .iter()
            .map(|&head| {
                let branch = self.analyze_branch(head).map_err(|err| {
                    warn!("Branch starting at '{}' rejected: {}", head, err);
                    err
                })?;
                debug!(
                    "Branch '{}' gated by '{}' has period {}",
                    branch.head, branch.gate, branch.period
                );
                Ok(branch)
            })
            .collect()
    }

    fn analyze_branch(&self, head: ModuleKey) -> Result<BranchPeriod, NetworkError> {
        let unsupported =
            |msg: String| NetworkError::UnsupportedStructure(format!("branch '{}': {}", head, msg));

        if self.registry.kind_of(&head) != Some(ModuleKind::FlipFlop) {
            return Err(unsupported("does not start with a flip-flop".to_string()));
        }

        let mut queue = VecDeque::from([head]);
        let mut visited = HashSet::from([head]);
        let mut gate: Option<ModuleKey> = None;
        let mut period = 0u64;
        let mut position = 0usize;

        while let Some(key) = queue.pop_front() {
            if position >= MAX_CHAIN_LEN {
                return Err(unsupported(format!(
                    "chain is longer than {} flip-flops",
                    MAX_CHAIN_LEN
                )));
            }

            // Chain positions only match counter bits while the chain is linear
            let mut successor: Option<ModuleKey> = None;

            for &output in self.registry.outputs(&key) {
                match self.registry.kind_of(&output) {
                    Some(ModuleKind::FlipFlop) => {
                        if let Some(first) = successor.filter(|&f| f != output) {
                            return Err(unsupported(format!(
                                "'{}' feeds more than one flip-flop ('{}' and '{}')",
                                key, first, output
                            )));
                        }
                        if successor.is_none() {
                            if !visited.insert(output) {
                                return Err(unsupported(format!(
                                    "'{}' feeds '{}' which is already in the chain",
                                    key, output
                                )));
                            }
                            queue.push_back(output);
                        }
                        successor = Some(output);
                    }
                    Some(ModuleKind::Conjunction) => {
                        if gate.map_or(false, |g| g != output) {
                            return Err(unsupported(format!(
                                "feeds more than one conjunction ('{}' and '{}')",
                                gate.unwrap_or(output),
                                output
                            )));
                        }
                        gate = Some(output);
                        period |= 1 << position;
                    }
                    Some(ModuleKind::Broadcaster) => {
                        return Err(unsupported(format!("'{}' feeds a broadcaster", key)))
                    }
                    None => {
                        return Err(unsupported(format!(
                            "'{}' feeds undefined module '{}'",
                            key, output
                        )))
                    }
                }
            }

            position += 1;
        }

        let gate = gate.ok_or_else(|| unsupported("never reaches a conjunction".to_string()))?;
        if period == 0 {
            return Err(unsupported("period is zero".to_string()));
        }
        if !self.reaches_terminal(gate) {
            return Err(unsupported(format!(
                "gate '{}' does not reach terminal '{}' through conjunctions",
                gate, self.terminal
            )));
        }

        Ok(BranchPeriod { head, gate, period })
    }

    /// Whether the terminal is fed by a path of conjunctions starting at `gate`
    fn reaches_terminal(&self, gate: ModuleKey) -> bool {
        let mut queue = VecDeque::from([gate]);
        let mut visited = HashSet::from([gate]);

        while let Some(key) = queue.pop_front() {
            for &output in self.registry.outputs(&key) {
                if output == self.terminal {
                    return true;
                }
                if self.registry.kind_of(&output) == Some(ModuleKind::Conjunction)
                    && visited.insert(output)
                {
                    queue.push_back(output);
                }
            }
        }

        false
    }
}

/// Greatest common divisor
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Least common multiple, `None` when it does not fit in a `u64`
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Least common multiple of a list of periods
pub fn lcm_all(periods: &[u64]) -> Result<u64, NetworkError> {
    let (&first, rest) = periods.split_first().ok_or_else(|| {
        NetworkError::UnsupportedStructure("no branches to combine".to_string())
    })?;

    rest.iter().try_fold(first, |acc, &p| {
        lcm(acc, p).ok_or_else(|| {
            NetworkError::UnsupportedStructure(format!(
                "combined period of {} and {} overflows u64",
                acc, p
            ))
        })
    })
}
