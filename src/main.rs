use std::{fs, io::Write, path::PathBuf, process::ExitCode};

use clap::{Parser, error::ErrorKind};
use quadra::{error::QuadraError, logging::init_tracing};

/// Exit status for malformed command lines (`EX_USAGE`).
const EXIT_USAGE: u8 = 64;
/// Exit status for a script that cannot be read (`EX_NOINPUT`).
const EXIT_NO_INPUT: u8 = 66;

/// quadra runs an indentation-structured script and prints the final global
/// scope.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the script to run.
    path: PathBuf,

    /// Do not print the global scope after the script finishes.
    #[arg(short, long)]
    quiet: bool,

    /// Print the parsed program tree instead of running it.
    #[arg(long)]
    ast: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if let Err(io) = e.print() {
                eprintln!("Failed to print usage: {io}");
            }
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        },
    };

    let Ok(source) = fs::read_to_string(&args.path) else {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  args.path.display());
        return ExitCode::from(EXIT_NO_INPUT);
    };

    if args.ast {
        return match quadra::parse(&source) {
            Ok(program) => {
                println!("{program:#?}");
                ExitCode::SUCCESS
            },
            Err(e) => fail(&e),
        };
    }

    let mut stdout = std::io::stdout();
    match quadra::run(&source, &mut stdout) {
        Ok(globals) => {
            if !args.quiet {
                print!("{globals}");
                if let Err(e) = stdout.flush() {
                    eprintln!("Failed to write the global scope: {e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        },
        Err(e) => fail(&e),
    }
}

fn fail(error: &QuadraError) -> ExitCode {
    eprintln!("{error}");
    ExitCode::from(error.exit_code())
}
