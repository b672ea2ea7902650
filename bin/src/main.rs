use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser as _;

use errors::LoxErrors;
use parser::Parser;
use scanner::TokenStream;

#[derive(clap::Parser)]
struct Args {
    file: Option<PathBuf>,
    /// Dump the scanned tokens instead of the parsed expression
    #[arg(long)]
    tokens: bool,
}

fn run_file(path: PathBuf, tokens: bool) -> anyhow::Result<ExitCode> {
    match run(&std::fs::read_to_string(path)?, tokens) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(errors) => {
            eprintln!("{}", errors);
            // EX_DATAERR, the source contained a syntax error
            Ok(ExitCode::from(65))
        }
    }
}

fn run_prompt(tokens: bool) -> anyhow::Result<ExitCode> {
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(ExitCode::SUCCESS);
        }
        // Each line is an independent parse, so an error on one line
        // never poisons the next
        if let Err(errors) = run(&line, tokens) {
            eprintln!("{}", errors);
        }
    }
}

fn run(source: &str, tokens: bool) -> Result<(), LoxErrors> {
    if tokens {
        let (tokens, errors) = scanner::scan(source);
        for token in &tokens {
            println!("{:?}", token.data);
        }
        return errors.is_empty().then_some(()).ok_or(errors);
    }

    let parser = Parser::new(TokenStream::new(source));
    let expr = parser.parse()?;
    println!("{}", expr);
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            e.print()?;
            // EX_USAGE
            return Ok(ExitCode::from(64));
        }
    };
    log::debug!("Dump tokens: {}", args.tokens);

    match args.file {
        Some(file) => run_file(file, args.tokens),
        None => run_prompt(args.tokens),
    }
}
