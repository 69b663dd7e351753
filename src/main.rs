//! bitcalc - CLI Entry Point
//!
//! `bitcalc -l 32 -v 0x1234` renders the value, then opens a prompt for
//! reading and editing its bits. `help` at the prompt lists the commands.
//!
//! Set `RUST_LOG=debug` to trace register edits on stderr.

use clap::Parser;
use bitcalc::repl::{self, ColorMode, Console, Session};
use bitcalc::{parse_unsigned, Register, Rendering};

/// Bad or missing command line arguments.
const EXIT_USAGE: i32 = 1;
/// The initial value could not be parsed or does not fit.
const EXIT_BAD_VALUE: i32 = 2;
/// The console could not be set up.
const EXIT_CONSOLE: i32 = 3;
/// Input could not be read at the prompt.
const EXIT_INPUT: i32 = 4;

#[derive(Parser)]
#[command(name = "bitcalc")]
#[command(version = "0.1.0")]
#[command(about = "Inspect and edit the bits of a register value")]
struct Cli {
    /// Register length in bits
    #[arg(short = 'l', long = "length", default_value_t = 32,
          value_parser = clap::value_parser!(u8).range(1..=64))]
    length: u8,

    /// Initial value, like 10, 0x03, 017 or 0b101
    #[arg(short = 'v', long = "value", default_value = "0")]
    value: String,

    /// When to color output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(EXIT_USAGE);
        }
        Err(e) => {
            // --help and --version
            let _ = e.print();
            return;
        }
    };

    setup_tracing();

    let register = match parse_unsigned(&cli.value)
        .and_then(|value| Register::with_value(cli.length as usize, value))
    {
        Ok(register) => register,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_BAD_VALUE);
        }
    };
    tracing::info!(width = register.width(), value = register.value(), "register loaded");

    println!("{}", Rendering::of(&register));

    let mut console = match Console::stdio(cli.color) {
        Ok(console) => console,
        Err(e) => {
            eprintln!("failed to set up console: {}", e);
            std::process::exit(EXIT_CONSOLE);
        }
    };

    let mut session = Session::new(register);
    if let Err(e) = repl::run(&mut session, &mut console) {
        eprintln!("{}", e);
        std::process::exit(EXIT_INPUT);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn setup_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let subscriber = Registry::default().with(filter).with(fmt_layer);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {}", e);
    }
}
