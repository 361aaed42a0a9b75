mod cli;
mod logger;
mod repl;

use std::{
    fmt::Display,
    io::Write,
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::{ArgAction, Parser, Subcommand};
use cli::{print_error, print_finished, print_running, stderr_buffer_writer};
use lox_core::{
    eval::prelude::{Interpreter, RuntimeError},
    runner::{parse_file, run_file, tokenize_file},
    utils::prelude::{ReporterIO, SyntaxError, EXIT_IO, EXIT_USAGE},
};

#[derive(Parser)]
#[command(name = "loxi", version, about = "Tree-walking interpreter for the Lox language")]
struct Cli {
    /// Log more, repeat for more detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Runs a script
    Run {
        /// Path of source file
        path: PathBuf,
        /// Render errors with source snippets and print status lines
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Prints the tokens of a script, one per line
    Tokenize {
        /// Path of source file
        path: PathBuf,
    },
    /// Prints the syntax tree of every statement in a script
    Parse {
        /// Path of source file
        path: PathBuf,
    },
    /// Runs Read Eval Print Loop (default)
    Repl,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();

            // --help and --version are not usage errors
            return match err.use_stderr() {
                true => ExitCode::from(EXIT_USAGE),
                false => ExitCode::SUCCESS,
            };
        }
    };

    if let Err(err) = logger::init(cli.verbose) {
        eprintln!("Failed to install logger: {err}");
    }

    match cli.command.unwrap_or(Command::Repl) {
        Command::Run { path, pretty } => {
            log::info!("running {}", path.display());

            if pretty {
                print_running(&path.display().to_string());
            }

            let start = Instant::now();
            let mut interpreter = Interpreter::stdout();

            match run_file(&path, &mut interpreter) {
                Ok(()) => {
                    if pretty {
                        print_finished(start.elapsed());
                    }

                    ExitCode::SUCCESS
                },
                Err(err) => {
                    print_error(&err, pretty);

                    ExitCode::from(err.exit_code())
                }
            }
        },
        Command::Tokenize { path } => match tokenize_file(&path) {
            Ok(tokens) => print_lines(tokens),
            Err(err) => {
                print_error(&err, false);

                ExitCode::from(err.exit_code())
            }
        },
        Command::Parse { path } => match parse_file(&path) {
            Ok(statements) => print_lines(statements),
            Err(err) => {
                print_error(&err, false);

                ExitCode::from(err.exit_code())
            }
        },
        Command::Repl => match repl::start() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                log::error!("repl stopped: {err}");

                ExitCode::from(EXIT_IO)
            }
        },
    }
}

fn print_lines(lines: impl IntoIterator<Item = impl Display>) -> ExitCode {
    let mut stdout = std::io::stdout().lock();

    let written = lines.into_iter()
        .try_for_each(|line| writeln!(stdout, "{line}"));

    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("failed to write to stdout: {err}");

            ExitCode::from(EXIT_IO)
        }
    }
}

/// Prints every diagnostic to stderr as soon as it is reported.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporterIO;

impl ConsoleReporterIO {
    fn print(&self, message: impl Display) {
        let buffer_writer = stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();

        let written = writeln!(buffer, "{message}")
            .and_then(|()| buffer_writer.print(&buffer));

        if let Err(err) = written {
            log::warn!("failed to write diagnostic to stderr: {err}");
        }
    }
}

impl ReporterIO for ConsoleReporterIO {
    fn syntax_error(&self, error: SyntaxError) {
        self.print(error);
    }

    fn runtime_error(&self, error: RuntimeError) {
        self.print(error);
    }
}
