use super::config::SimulationConfig;
use super::dispatcher::{Dispatcher, PressReport, PulseCounts};
use crate::core::builder::network_builder::NetworkBuilder;
use crate::core::components::registry::ModuleRegistry;
use crate::core::components::types::NetworkError;
use crate::core::event::{Level, Pulse};
use crate::core::types::ModuleKey;
use log::debug;

/// Observer trait for pulse network runs
pub trait PulseObserver {
    /// Called for every pulse as it is delivered
    fn on_pulse(&mut self, pulse: &Pulse);

    /// Called when a button press has run to quiescence
    fn on_press_complete(&mut self, press: u64, report: &PressReport);
}

/// A wired network together with the dispatcher and the running totals
///
/// Counters grow across presses until `reset` is called.
pub struct PulseSimulation {
    registry: ModuleRegistry,
    dispatcher: Dispatcher,
    config: SimulationConfig,
    counts: PulseCounts,
    presses: u64,
    observers: Vec<Box<dyn PulseObserver>>,
}

impl PulseSimulation {
    /// Wrap a registry, wiring it first if that has not happened yet
    pub fn new(mut registry: ModuleRegistry, config: SimulationConfig) -> Self {
        if !registry.is_wired() {
            registry.wire_inputs();
        }

        Self {
            registry,
            dispatcher: Dispatcher::new(),
            config,
            counts: PulseCounts::default(),
            presses: 0,
            observers: Vec::new(),
        }
    }

    /// Parse and wire a network description
    pub fn from_text(text: &str, config: SimulationConfig) -> Result<Self, NetworkError> {
        let registry = NetworkBuilder::from_text(text)?.build()?;
        Ok(Self::new(registry, config))
    }

    pub fn add_observer(&mut self, observer: Box<dyn PulseObserver>) {
        self.observers.push(observer);
    }

    /// Press the button into the configured entry module
    pub fn push_button(&mut self) -> Result<PressReport, NetworkError> {
        let entry = self.config.entry_key();
        self.push_button_at(entry)
    }

    /// Press the button into an arbitrary module
    pub fn push_button_at(&mut self, entry: ModuleKey) -> Result<PressReport, NetworkError> {
        self.press(entry, |_| {})
    }

    fn press<F>(&mut self, entry: ModuleKey, mut watch: F) -> Result<PressReport, NetworkError>
    where
        F: FnMut(&Pulse),
    {
        let observers = &mut self.observers;
        let report = self.dispatcher.push_button(&mut self.registry, entry, |pulse| {
            watch(pulse);
            for observer in observers.iter_mut() {
                observer.on_pulse(pulse);
            }
        })?;

        self.presses += 1;
        self.counts.add(&report.counts);
        debug!(
            "Press {}: {} low, {} high",
            self.presses, report.counts.low, report.counts.high
        );

        for observer in self.observers.iter_mut() {
            observer.on_press_complete(self.presses, &report);
        }

        Ok(report)
    }

    /// Perform the configured number of presses and return the running totals
    pub fn run(&mut self) -> Result<PulseCounts, NetworkError> {
        for _ in 0..self.config.presses {
            self.push_button()?;
        }
        Ok(self.counts)
    }

    /// Press until `target` receives a pulse of `level`.
    ///
    /// Returns the press number (counted since the last reset), or `None` once
    /// `max_presses` presses have been made without seeing it.
    pub fn presses_until(
        &mut self,
        target: ModuleKey,
        level: Level,
    ) -> Result<Option<u64>, NetworkError> {
        let limit = self.config.max_presses.unwrap_or(0);
        let entry = self.config.entry_key();

        for _ in 0..limit {
            let mut seen = false;
            self.press(entry, |pulse| {
                seen |= pulse.destination == target && pulse.level == level;
            })?;
            if seen {
                return Ok(Some(self.presses));
            }
        }

        Ok(None)
    }

    /// Restore every module's initial state and zero the counters
    pub fn reset(&mut self) {
        self.registry.reset();
        self.counts = PulseCounts::default();
        self.presses = 0;
    }

    pub fn counts(&self) -> PulseCounts {
        self.counts
    }

    pub fn low(&self) -> u64 {
        self.counts.low
    }

    pub fn high(&self) -> u64 {
        self.counts.high
    }

    /// Low total times high total
    pub fn pulse_product(&self) -> u64 {
        self.counts.product()
    }

    pub fn presses(&self) -> u64 {
        self.presses
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
