use rusty_monkey::monkey_frontend::errors::ParserError;
use rusty_monkey::monkey_frontend::{Lexer, Parser};
use rusty_monkey::treewalk_interpreter::Interpreter;

use clap::Parser as ClapParser;
use std::io::{self, BufRead, Write};
use std::{fs, process};
use tracing_subscriber::EnvFilter;

/// Tree-walking interpreter for the Monkey language.
#[derive(ClapParser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
    /// Script to run. Starts a REPL when omitted.
    script: Option<String>,

    /// Print the parsed program before evaluating it.
    #[clap(long)]
    print_ast: bool,

    /// Print the token stream before parsing.
    #[clap(long)]
    print_tokens: bool,
}

const PROMPT: &str = ">> ";

enum RunError {
    Syntax(Vec<ParserError>),
    Eval(String),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match &args.script {
        Some(script) => run_file(script, &args),
        None => run_prompt(&args),
    }
}

fn run_prompt(args: &Args) {
    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", PROMPT);
        if io::stdout().flush().is_err() {
            return;
        }

        let input = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Failed to read line: {}", e);
                return;
            }
            None => return,
        };

        if input.trim() == "exit" {
            return;
        }

        match run(&mut interpreter, &input, args) {
            Ok(output) => println!("{}", output),
            Err(RunError::Syntax(errors)) => report_syntax_errors(&errors),
            Err(RunError::Eval(message)) => println!("ERROR: {}", message),
        }
    }
}

fn run_file(filename: &str, args: &Args) {
    let contents = fs::read_to_string(filename).unwrap_or_else(|e| {
        eprintln!("Failed to read file '{}': {}", filename, e);
        process::exit(66);
    });
    let mut interpreter = Interpreter::new();

    match run(&mut interpreter, &contents, args) {
        Ok(output) => println!("{}", output),
        Err(RunError::Syntax(errors)) => {
            report_syntax_errors(&errors);
            process::exit(65);
        }
        Err(RunError::Eval(message)) => {
            eprintln!("ERROR: {}", message);
            process::exit(70);
        }
    }
}

fn run(interpreter: &mut Interpreter, source: &str, args: &Args) -> Result<String, RunError> {
    if args.print_tokens {
        for token in Lexer::new(source).iter() {
            println!("{}", token);
        }
    }

    let (program, errors) = Parser::new(source).parse_program();
    if !errors.is_empty() {
        return Err(RunError::Syntax(errors));
    }

    if args.print_ast {
        println!("{}", program);
    }

    match interpreter.run(&program) {
        Ok(value) => Ok(value.to_string()),
        Err(e) => Err(RunError::Eval(e.to_string())),
    }
}

fn report_syntax_errors(errors: &[ParserError]) {
    eprintln!("Syntax errors:");
    for error in errors.iter() {
        eprintln!("\t[line {}] {}", error.line(), error);
    }
}
