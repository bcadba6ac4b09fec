use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rvmx::sim::{parse_machine_code, Simulator};
use rvmx::snapshot;
use tracing::{error, info};

/// Assemble-and-run driver for the RISC-V matrix-extension simulator.
///
/// With no flags and a machine-code path given, loads the snapshot files
/// from `--state-dir`, loads and runs the program, then writes the snapshot
/// files back out.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Machine-code file: one instruction per line, each a 32-bit string of
    /// 0/1 (MSB first). Required unless `--setup` or `--reset` is given.
    program: Option<PathBuf>,

    /// Interactively initialize GPR/CSR state from stdin, save it, and exit
    /// without running anything.
    #[arg(long)]
    setup: bool,

    /// Rewrite every snapshot file in `--state-dir` to its zeroed form and exit.
    #[arg(long)]
    reset: bool,

    /// Directory holding the snapshot files (gpr.txt, config.txt, ...).
    #[arg(long, default_value = "state")]
    state_dir: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if args.reset {
        return match snapshot::reset_all(&args.state_dir) {
            Ok(()) => {
                info!(dir = %args.state_dir.display(), "reset snapshot files to zero");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "failed to reset snapshot files");
                ExitCode::FAILURE
            }
        };
    }

    if args.setup {
        return match run_setup(&args.state_dir) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "setup failed");
                ExitCode::FAILURE
            }
        };
    }

    let Some(program_path) = args.program else {
        eprintln!("error: a machine-code PROGRAM path is required unless --setup or --reset is given");
        return ExitCode::FAILURE;
    };

    match run_program(&args.state_dir, &program_path) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run_program(state_dir: &Path, program_path: &Path) -> Result<bool, Box<dyn std::error::Error>> {
    let mut sim = Simulator::new();
    snapshot::read_all(&mut sim, state_dir)?;

    let text = std::fs::read_to_string(program_path)?;
    let words = parse_machine_code(&text)?;
    info!(count = words.len(), path = %program_path.display(), "loaded machine code");

    let ok = sim.run(&words);
    if !ok {
        error!("simulation reported at least one error; see warnings above");
    }

    snapshot::write_all(&sim, state_dir)?;
    info!(dir = %state_dir.display(), "wrote snapshot state");
    Ok(ok)
}

fn run_setup(state_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut sim = Simulator::new();

    println!("--- Interactive register setup (blank line = leave at 0) ---");
    for i in 1u8..32 {
        print!("x{i} (hex, e.g. 0x10): ");
        io::stdout().flush().ok();
        let Some(line) = lines.next() else { break };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        match u32::from_str_radix(digits, 16) {
            Ok(v) => sim.gpr.write(i, v),
            Err(_) => println!("  (ignored, not a hex value)"),
        }
    }

    for (name, setter) in [
        ("mtilem", (|s: &mut Simulator, v: u32| s.csr.mtilem = v) as fn(&mut Simulator, u32)),
        ("mtilen", |s: &mut Simulator, v: u32| s.csr.mtilen = v),
        ("mtilek", |s: &mut Simulator, v: u32| s.csr.mtilek = v),
    ] {
        print!("{name} (decimal, e.g. 4): ");
        io::stdout().flush().ok();
        let Some(line) = lines.next() else { break };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.parse() {
            Ok(v) => setter(&mut sim, v),
            Err(_) => println!("  (ignored, not a decimal value)"),
        }
    }

    snapshot::write_all(&sim, state_dir)?;
    println!("Setup complete. Run again with a machine-code path to simulate.");
    Ok(())
}
