//! Command line runner: builds a pulse network from a file and answers either
//! the pulse count question or the terminal period question.
use clap::Parser;
use pulsenet::{NetworkError, PeriodAnalyzer, PulseSimulation, SimulationConfig};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(about = "Simulate a pulse propagation network")]
struct Args {
    /// Network description, one module per line
    input: PathBuf,

    /// 1: low * high after the configured presses, 2: first press reaching the terminal low
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    part: u8,

    /// Button presses for part 1
    #[arg(long, default_value_t = 1000)]
    presses: u64,

    /// Terminal module for part 2
    #[arg(long, default_value = "rx")]
    terminal: String,

    /// Print the answer as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Answer {
    part: u8,
    answer: u64,
    low: u64,
    high: u64,
}

fn solve(args: &Args) -> Result<Answer, NetworkError> {
    let text = std::fs::read_to_string(&args.input)?;
    let config = SimulationConfig::new()
        .with_presses(args.presses)
        .with_terminal(&args.terminal);
    let mut sim = PulseSimulation::from_text(&text, config)?;

    let answer = match args.part {
        1 => {
            sim.run()?;
            sim.pulse_product()
        }
        _ => PeriodAnalyzer::new(sim.registry(), sim.config().terminal_key()).analyze()?,
    };

    Ok(Answer {
        part: args.part,
        answer,
        low: sim.low(),
        high: sim.high(),
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    match solve(&args) {
        Ok(answer) if args.json => match serde_json::to_string(&answer) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {}", err);
                ExitCode::FAILURE
            }
        },
        Ok(answer) => {
            println!("Part {}: {}", answer.part, answer.answer);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
