use std::{env, process::ExitCode};

use pratt_calc::{
    display_error, drive_parse,
    parser::parser::{engine_by_name, ParseEngine, PARSERS},
    visitors::{evaluator::evaluate, printer::to_sexpr},
};
use rustyline::{error::ReadlineError, DefaultEditor};

fn main() -> ExitCode {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut engines: Vec<&'static dyn ParseEngine> = PARSERS.to_vec();

    if let Some(index) = args.iter().position(|arg| arg == "--strategy") {
        let Some(name) = args.get(index + 1).cloned() else {
            eprintln!("error: --strategy needs one of: recursive, iterative, shunting-yard");
            return ExitCode::FAILURE;
        };
        let Some(engine) = engine_by_name(&name) else {
            eprintln!("error: unknown strategy `{}`", name);
            return ExitCode::FAILURE;
        };
        engines = vec![engine];
        args.drain(index..index + 2);
    }

    if !args.is_empty() {
        let source = args.join(" ");
        let results: Vec<bool> = engines.iter().map(|engine| display(*engine, &source)).collect();
        return if results.iter().all(|ok| *ok) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    repl(&engines)
}

fn repl(engines: &[&'static dyn ParseEngine]) -> ExitCode {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(error) => {
            eprintln!("error: failed to initialize repl: {}", error);
            return ExitCode::FAILURE;
        }
    };

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if let Err(error) = editor.add_history_entry(line.as_str()) {
                    log::warn!("could not record history: {}", error);
                }
                for engine in engines {
                    display(*engine, &line);
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!();
                return ExitCode::SUCCESS;
            }
            Err(error) => {
                eprintln!("error: {}", error);
                return ExitCode::FAILURE;
            }
        }
    }
}

/// Parses and evaluates `source` with one engine, printing the outcome.
fn display(engine: &dyn ParseEngine, source: &str) -> bool {
    let tree = match drive_parse(source, engine) {
        Ok(tree) => tree,
        Err(error) => {
            println!("{} errored: {}", engine.name(), error);
            display_error(&error, source);
            return false;
        }
    };

    let evaluated = evaluate(&tree);
    match &evaluated {
        Ok(value) => println!("{} evaluated to {}", engine.name(), value),
        Err(error) => println!("{} errored: {}", engine.name(), error),
    }
    println!("   s-exp: {}", to_sexpr(&tree));

    evaluated.is_ok()
}
