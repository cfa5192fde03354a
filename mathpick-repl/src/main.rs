mod command;
mod error;
mod session;

use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use std::io::{self, BufRead, IsTerminal};

/// Executes one line of input, printing its output and reporting its errors.
fn run_line(input: &str, session: &mut Session) {
    match session.execute(input) {
        Ok(output) => {
            if !output.text.is_empty() {
                println!("{}", output.text);
            }
            error::report_to_stderr(&output.failures, input);
        },
        Err(err) => error::report_to_stderr(&[err], input),
    }
}

fn main() {
    let mut session = Session::new();

    if !io::stdin().is_terminal() {
        // run each line of stdin as a command
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => run_line(&line, &mut session),
                Err(err) => {
                    eprintln!("{}", err);
                    break;
                },
            }
        }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return;
            },
        };
        println!("type `help` to list the commands");

        fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            run_line(&input, session);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut session) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
