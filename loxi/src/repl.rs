use std::{io::Write, rc::Rc};

use lox_core::{
    eval::prelude::Interpreter,
    runner::run_source,
    utils::prelude::Reporter,
};

use crate::ConsoleReporterIO;

const PROMPT: &str = "> ";

pub fn start() -> std::io::Result<()> {
	if let Err(err) = ctrlc::set_handler(|| {
		eprintln!();
		std::process::exit(0);
	}) {
		log::warn!("failed to install Ctrl-C handler: {err}");
	}

	let stdin = std::io::stdin();
	let reporter = Reporter::new(Rc::new(ConsoleReporterIO));
	let mut interpreter = Interpreter::stdout();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			println!();
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let outcome = run_source(&input, &mut interpreter, &reporter);

				log::debug!("line finished with {outcome:?}");

				// a bad line does not poison the session
				reporter.reset();
			}
		}
	}
}
