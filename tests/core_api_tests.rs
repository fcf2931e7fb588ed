use pulsenet::core::{
    components::{ModuleKind, ModuleState},
    execution::dispatcher::{PressReport, PulseCounts},
};
use pulsenet::{
    Level, ModuleKey, NetworkBuilder, NetworkError, PeriodAnalyzer, Pulse, PulseObserver,
    PulseSimulation, SimulationConfig,
};
use std::cell::RefCell;
use std::rc::Rc;

const EXAMPLE: &str = "broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Observer collecting every pulse that reaches one module
struct Probe {
    target: ModuleKey,
    seen: Rc<RefCell<Vec<(u64, Level)>>>,
    press: u64,
}

impl PulseObserver for Probe {
    fn on_pulse(&mut self, pulse: &Pulse) {
        if pulse.destination == self.target {
            self.seen.borrow_mut().push((self.press + 1, pulse.level));
        }
    }

    fn on_press_complete(&mut self, press: u64, _report: &PressReport) {
        self.press = press;
    }
}

#[test]
fn test_single_press_regression() {
    init_logging();
    let mut sim = PulseSimulation::from_text(EXAMPLE, SimulationConfig::new()).unwrap();

    let report = sim.push_button().unwrap();

    // 1 button low, 3 broadcaster lows, then a->b->c->inv->a twice round
    assert_eq!(report.counts, PulseCounts { low: 8, high: 4 });
    assert_eq!(sim.low(), 8);
    assert_eq!(sim.high(), 4);

    // The loop settles back to the initial state
    for name in ["a", "b", "c"] {
        let module = sim.registry().get_module(&ModuleKey::encode(name)).unwrap();
        assert_eq!(module.state(), &ModuleState::FlipFlop { on: false });
    }
}

#[test]
fn test_thousand_presses() {
    init_logging();
    let mut sim = PulseSimulation::from_text(EXAMPLE, SimulationConfig::default()).unwrap();
    sim.run().unwrap();
    assert_eq!(sim.pulse_product(), 32000000);
}

#[test]
fn test_build_by_hand_matches_parsed() {
    let mut builder = NetworkBuilder::new();
    builder.add_module(ModuleKind::Broadcaster, "broadcaster", &["a", "b", "c"]);
    builder.add_module(ModuleKind::FlipFlop, "a", &["b"]);
    builder.add_module(ModuleKind::FlipFlop, "b", &["c"]);
    builder.add_module(ModuleKind::FlipFlop, "c", &["inv"]);
    builder.add_module(ModuleKind::Conjunction, "inv", &["a"]);

    let mut by_hand = PulseSimulation::new(builder.build().unwrap(), SimulationConfig::new());
    let mut parsed = PulseSimulation::from_text(EXAMPLE, SimulationConfig::new()).unwrap();

    assert_eq!(by_hand.run().unwrap(), parsed.run().unwrap());
}

#[test]
fn test_observer_sees_pulses_to_sink() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let text = "broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output";
    let mut sim =
        PulseSimulation::from_text(text, SimulationConfig::new().with_presses(2)).unwrap();
    sim.add_observer(Box::new(Probe {
        target: ModuleKey::encode("output"),
        seen: seen.clone(),
        press: 0,
    }));

    sim.run().unwrap();

    // press 1: con sees a high then b high, press 2: a low -> con high
    assert_eq!(
        *seen.borrow(),
        vec![(1, Level::High), (1, Level::Low), (2, Level::High)]
    );
}

#[test]
fn test_parse_errors_are_fatal() {
    let result = PulseSimulation::from_text("broadcaster -> a\n%a b", SimulationConfig::new());
    assert!(matches!(result, Err(NetworkError::Parse { line: 2, .. })));
}

#[test]
fn test_push_button_into_unknown_entry() {
    let config = SimulationConfig::new().with_entry("nope");
    let mut sim = PulseSimulation::from_text(EXAMPLE, config).unwrap();
    assert_eq!(
        sim.push_button(),
        Err(NetworkError::ModuleNotFound(ModuleKey::encode("nope")))
    );
    assert_eq!(sim.presses(), 0);
}

#[test]
fn test_period_analyzer_rejects_example() {
    let sim = PulseSimulation::from_text(EXAMPLE, SimulationConfig::new()).unwrap();
    let terminal = sim.config().terminal_key();
    let result = PeriodAnalyzer::new(sim.registry(), terminal).analyze();
    assert!(matches!(result, Err(NetworkError::UnsupportedStructure(_))));
}
