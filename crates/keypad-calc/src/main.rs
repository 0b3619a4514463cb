//! keypad-calc: drive the keypad calculator from the command line
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc run 6 + 4 × 2 =              # prints 20
//! keypad-calc run --scientific 1 8 0 sin   # prints 0
//! echo "1 + 2 =" | keypad-calc run --json  # transcript as JSON
//! keypad-calc keypad --scientific          # show the button grid
//! ```

use clap::{Args, Parser, Subcommand};
use keypad_calc::prelude::*;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Keypad calculator with operator chaining and a scientific variant
#[derive(Parser, Debug)]
#[command(name = "keypad-calc", version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Press a sequence of keys and print the display
    Run(RunArgs),

    /// Print the keypad layout
    Keypad(KeypadArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Key tokens, e.g. `1 2 + 3 =`; read from stdin when omitted
    #[arg(allow_hyphen_values = true)]
    tokens: Vec<String>,

    /// Use the scientific calculator
    #[arg(short, long)]
    scientific: bool,

    /// Configuration file (.yaml, .yml or .json)
    #[arg(short, long, env = "KEYPAD_CALC_CONFIG")]
    config: Option<PathBuf>,

    /// Print the display after every key
    #[arg(long, conflicts_with = "json")]
    steps: bool,

    /// Print the full transcript as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct KeypadArgs {
    /// Show the scientific keypad
    #[arg(short, long)]
    scientific: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .init();
}

fn run(command: Commands) -> CalcResult<()> {
    match command {
        Commands::Run(args) => run_tape(&args),
        Commands::Keypad(args) => {
            run_keypad(&args);
            Ok(())
        }
    }
}

fn run_tape(args: &RunArgs) -> CalcResult<()> {
    let mut config = match &args.config {
        Some(path) => CalculatorConfig::load(path)?,
        None => CalculatorConfig::default(),
    };
    if args.scientific {
        config.variant = Variant::Scientific;
    }

    let text = if args.tokens.is_empty() {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        input
    } else {
        args.tokens.join(" ")
    };

    let tape = Tape::parse(&text)?;
    tape.check_variant(config.variant)?;
    let transcript = tape.replay(&mut config.build_evaluator());

    if args.json {
        println!("{}", transcript.to_json()?);
    } else if args.steps {
        for step in &transcript.steps {
            match step.angle_mode {
                Some(mode) => println!("{:>4}  {}  [{mode}]", step.event, step.display),
                None => println!("{:>4}  {}", step.event, step.display),
            }
        }
    } else {
        println!("{}", transcript.final_display());
    }
    Ok(())
}

fn run_keypad(args: &KeypadArgs) {
    let keypad = if args.scientific {
        Keypad::scientific()
    } else {
        Keypad::basic()
    };
    print!("{}", keypad.render_text(AngleMode::default()));
}
