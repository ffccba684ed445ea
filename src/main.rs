use std::fs;

use clap::Parser;
use skit::{interpreter::evaluator::core::Context, run, stdlib};

/// skit is a small, embeddable scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells skit to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let mut context = Context::new();
    stdlib::install(&mut context);

    if let Err(e) = run(&script, &mut context) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
