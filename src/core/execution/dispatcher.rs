use crate::core::components::registry::ModuleRegistry;
use crate::core::components::types::NetworkError;
use crate::core::event::{Level, Pulse};
use crate::core::types::ModuleKey;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Low/high pulse totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseCounts {
    pub low: u64,
    pub high: u64,
}

impl PulseCounts {
    /// Count one emission fanned out over `fan_out` wires
    pub fn record(&mut self, level: Level, fan_out: usize) {
        let counter = match level {
            Level::Low => &mut self.low,
            Level::High => &mut self.high,
        };
        *counter = counter.saturating_add(fan_out as u64);
    }

    pub fn total(&self) -> u64 {
        self.low.saturating_add(self.high)
    }

    /// Low total times high total, saturating at `u64::MAX`
    pub fn product(&self) -> u64 {
        self.low.saturating_mul(self.high)
    }

    pub fn add(&mut self, other: &PulseCounts) {
        self.low = self.low.saturating_add(other.low);
        self.high = self.high.saturating_add(other.high);
    }
}

/// Outcome of one button press
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressReport {
    /// Pulses sent during the press
    pub counts: PulseCounts,
    /// Pulses taken off the queue, sinks included
    pub delivered: u64,
    /// Pulses delivered to undefined modules
    pub sunk: u64,
}

/// FIFO pulse queue driving one button press to quiescence
///
/// Pulses are delivered strictly in the order they were sent across the whole
/// network. Every emission is counted when it is sent, once per output wire.
#[derive(Debug, Default)]
pub struct Dispatcher {
    queue: VecDeque<Pulse>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press the button into `entry` and run until no pulse is in flight.
    ///
    /// `on_pulse` sees every pulse as it is delivered.
    pub fn push_button<F>(
        &mut self,
        registry: &mut ModuleRegistry,
        entry: ModuleKey,
        mut on_pulse: F,
    ) -> Result<PressReport, NetworkError>
    where
        F: FnMut(&Pulse),
    {
        if !registry.has_module(&entry) {
            return Err(NetworkError::ModuleNotFound(entry));
        }

        let mut report = PressReport::default();
        self.queue.clear();
        self.send(&mut report, ModuleKey::BUTTON, Level::Low, &[entry]);

        while let Some(pulse) = self.queue.pop_front() {
            trace!("{}", pulse);
            report.delivered += 1;
            on_pulse(&pulse);

            // Undefined destinations are sinks
            let Some(module) = registry.get_module_mut(&pulse.destination) else {
                report.sunk += 1;
                continue;
            };

            if let Some(level) = module.set_input(pulse.source, pulse.level)? {
                let source = module.key();
                self.send(&mut report, source, level, module.outputs());
            }
        }

        Ok(report)
    }

    fn send(&mut self, report: &mut PressReport, source: ModuleKey, level: Level, outputs: &[ModuleKey]) {
        report.counts.record(level, outputs.len());
        self.queue
            .extend(outputs.iter().map(|&destination| Pulse::new(source, level, destination)));
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::network_builder::NetworkBuilder;

    const EXAMPLE: &str = "broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a";

    fn key(name: &str) -> ModuleKey {
        ModuleKey::encode(name)
    }

    #[test]
    fn test_single_press_of_example() {
        let mut registry = NetworkBuilder::from_text(EXAMPLE).unwrap().build().unwrap();
        let mut dispatcher = Dispatcher::new();

        let report = dispatcher
            .push_button(&mut registry, ModuleKey::BROADCASTER, |_| {})
            .unwrap();

        assert_eq!(report.counts, PulseCounts { low: 8, high: 4 });
        assert_eq!(report.delivered, report.counts.total());
        assert_eq!(report.sunk, 0);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_delivery_order_is_breadth_first() {
        let mut registry = NetworkBuilder::from_text(EXAMPLE).unwrap().build().unwrap();
        let mut dispatcher = Dispatcher::new();
        let mut seen = Vec::new();

        dispatcher
            .push_button(&mut registry, ModuleKey::BROADCASTER, |p| {
                seen.push((p.source.name(), p.level, p.destination.name()))
            })
            .unwrap();

        let expected: Vec<(String, Level, String)> = [
            ("butt", Level::Low, "broa"),
            ("broa", Level::Low, "a"),
            ("broa", Level::Low, "b"),
            ("broa", Level::Low, "c"),
            ("a", Level::High, "b"),
            ("b", Level::High, "c"),
            ("c", Level::High, "inv"),
            ("inv", Level::Low, "a"),
            ("a", Level::Low, "b"),
            ("b", Level::Low, "c"),
            ("c", Level::Low, "inv"),
            ("inv", Level::High, "a"),
        ]
        .iter()
        .map(|&(s, l, d)| (s.to_string(), l, d.to_string()))
        .collect();

        assert_eq!(seen, expected);
    }

    #[test]
    fn test_sinks_are_counted_but_not_dispatched() {
        let mut registry = NetworkBuilder::from_text("broadcaster -> out, a\n%a -> out")
            .unwrap()
            .build()
            .unwrap();
        let report = Dispatcher::new()
            .push_button(&mut registry, ModuleKey::BROADCASTER, |_| {})
            .unwrap();

        // button->bc, bc->out, bc->a low; a->out high
        assert_eq!(report.counts, PulseCounts { low: 3, high: 1 });
        assert_eq!(report.sunk, 2);
    }

    #[test]
    fn test_counts_saturate_instead_of_overflowing() {
        let mut counts = PulseCounts {
            low: u64::MAX - 1,
            high: u64::MAX / 2,
        };
        counts.record(Level::Low, 5);
        assert_eq!(counts.low, u64::MAX);
        assert_eq!(counts.total(), u64::MAX);
        assert_eq!(counts.product(), u64::MAX);

        counts.add(&PulseCounts { low: 1, high: u64::MAX });
        assert_eq!(counts.high, u64::MAX);
    }

    #[test]
    fn test_unknown_entry_is_an_error() {
        let mut registry = NetworkBuilder::from_text(EXAMPLE).unwrap().build().unwrap();
        let result = Dispatcher::new().push_button(&mut registry, key("nope"), |_| {});
        assert_eq!(result, Err(NetworkError::ModuleNotFound(key("nope"))));
    }

    #[test]
    fn test_press_into_flip_flop_entry() {
        let mut registry = NetworkBuilder::from_text(EXAMPLE).unwrap().build().unwrap();
        let report = Dispatcher::new()
            .push_button(&mut registry, key("c"), |_| {})
            .unwrap();

        // button->c low, c->inv high, inv->a low, a->b high
        assert_eq!(report.counts, PulseCounts { low: 2, high: 2 });
    }
}
