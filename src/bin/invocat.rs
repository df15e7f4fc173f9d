use clap::Parser as ClapParser;
use invocat::Interpreter;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

/// Generate aleatory text from an Invocat grammar.
#[derive(ClapParser, Debug)]
#[command(name = "invocat", about, version)]
struct Cli {
    /// Seed the random source with an arbitrary string (same seed, same
    /// source text => identical output).
    #[arg(short, long)]
    seed: Option<String>,

    /// Start a line-oriented REPL instead of (or after) evaluating files.
    /// Enter `??` to print the currently bound names.
    #[arg(short, long)]
    interactive: bool,

    /// Source files to evaluate, in order, against one shared interpreter.
    files: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let mut interp = Interpreter::new(cli.seed.as_deref());

    for path in &cli.files {
        match interp.try_eval(&read_file(path)) {
            Ok(values) => print_values(&values),
            Err(error) => {
                eprintln!("{path}: {error}");
                return ExitCode::FAILURE;
            }
        }
    }

    if cli.interactive && run_repl(&mut interp).is_err() {
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|error| {
        eprintln!("{path}: {error}");
        std::process::exit(1);
    })
}

fn print_values(values: &[String]) {
    for value in values {
        println!("{value}");
    }
}

fn run_repl(interp: &mut Interpreter) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim() == "??" {
            for name in interp.names() {
                println!("{name}");
            }
            continue;
        }
        match interp.try_eval(&line) {
            Ok(values) => print_values(&values),
            Err(error) => eprintln!("{error}"),
        }
    }
    Ok(())
}
