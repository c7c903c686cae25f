//! Command-line front end for `qsim-core`: builds a handful of built-in
//! demo circuits, runs them through the engine registry, and prints
//! amplitudes or a measurement histogram.

use clap::{Parser, Subcommand};
use qsim_core::core::engine::EngineResult;
use qsim_core::core::registry::Engine;
use qsim_core::{EngineConfig, QuantumCircuit, REGISTRY};

#[derive(Parser)]
#[command(name = "qsim", about = "Dense state-vector quantum circuit simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Engine id to run the circuit through.
    #[arg(long, global = true, default_value = "statevector")]
    engine: String,

    /// Seeds the measurement sampler.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of measurement shots.
    #[arg(long, global = true, default_value_t = 1024)]
    shots: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Two-qubit Bell pair: H(0), CX(0,1).
    Bell,
    /// n-qubit GHZ state: H(0) then a CX chain.
    Ghz {
        #[arg(default_value_t = 3)]
        qubits: usize,
    },
    /// Sweeps RX(theta) over evenly spaced angles on a single qubit.
    RotationSweep {
        #[arg(default_value_t = 8)]
        steps: usize,
    },
    /// Lists the engines registered with the runtime registry.
    Engines,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if matches!(cli.command, Command::Engines) {
        let mut ids = REGISTRY.available();
        ids.sort_unstable();
        for id in ids {
            println!("{}", id);
        }
        return;
    }

    let circuit = match &cli.command {
        Command::Bell => QuantumCircuit::new(2).h(0).cx(0, 1).measure_all(),
        Command::Ghz { qubits } => build_ghz(*qubits),
        Command::RotationSweep { steps } => build_rotation_sweep(*steps),
        Command::Engines => unreachable!("handled above"),
    };

    let engine = match REGISTRY.get(&cli.engine) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    let config = EngineConfig {
        shots: cli.shots,
        prng_seed: cli.seed,
        ..EngineConfig::default()
    };

    let cancelled = std::sync::atomic::AtomicBool::new(false);
    match engine.run(&circuit, &config, &cancelled) {
        Ok(result) => print_result(&result),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}

fn build_ghz(qubits: usize) -> QuantumCircuit {
    let mut circuit = QuantumCircuit::new(qubits.max(1)).h(0);
    for q in 1..qubits {
        circuit = circuit.cx(q - 1, q);
    }
    circuit.measure_all()
}

fn build_rotation_sweep(steps: usize) -> QuantumCircuit {
    let mut circuit = QuantumCircuit::new(1);
    let steps = steps.max(1);
    for i in 0..steps {
        let theta = std::f64::consts::PI * (i as f64) / (steps as f64);
        circuit = circuit.rx(0, theta);
    }
    circuit
}

fn print_result(result: &EngineResult) {
    match result {
        EngineResult::StateVector {
            amplitudes,
            qubit_count,
            gate_count,
            elapsed,
            histogram,
            total_shots,
        } => {
            println!("qubits={} gates={} elapsed={:?} shots={}", qubit_count, gate_count, elapsed, total_shots);

            if let Some(hist) = histogram {
                let mut entries: Vec<_> = hist.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                for (outcome, count) in entries {
                    println!("{}: {}", outcome, count);
                }
            }

            for (k, chunk) in amplitudes.chunks(2).enumerate() {
                let (re, im) = (chunk[0], chunk[1]);
                if re.abs() > 1e-9 || im.abs() > 1e-9 {
                    println!("|{:0width$b}>: {:+.6}{:+.6}i", k, re, im, width = (*qubit_count).max(1));
                }
            }
        }
        EngineResult::Empty { qubit_count } => {
            println!("empty result, qubits={}", qubit_count);
        }
    }
}
