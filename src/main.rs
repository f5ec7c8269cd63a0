//! sharpjs: compiles a C#-like source file to JavaScript.
//!
//! Usage:
//!   sharpjs [options] <FILE>

use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, ValueEnum};
use sharpjs::{
    checker::checker::check,
    compile,
    generator::generator::{Generator, GeneratorOptions},
    lexer::lexer::tokenize,
    render_error,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Emit {
    /// Generated JavaScript.
    Js,
    /// The syntax tree as JSON.
    Ast,
    /// One line per token.
    Tokens,
}

#[derive(Parser, Debug)]
#[command(name = "sharpjs", about = "Compile a C#-like source file to JavaScript")]
struct Args {
    /// Source file to compile.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// What to print.
    #[arg(long, value_enum, default_value_t = Emit::Js)]
    emit: Emit,

    /// Run the diagnostics pass and report its findings on stderr.
    #[arg(long)]
    check: bool,

    /// Spaces per indentation level in generated code.
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// Append a call to the entry class's static `Main` method.
    #[arg(long)]
    run_main: bool,

    /// Write output to this path instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() {
    // stdout carries only program output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sharpjs=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    process::exit(run(&args));
}

fn run(args: &Args) -> i32 {
    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            error!(path = %args.file.display(), "failed to read source file");
            eprintln!("Error: cannot read {}: {}", args.file.display(), err);
            return 1;
        }
    };
    let file_name = display_name(&args.file);

    let output = match args.emit {
        Emit::Tokens => tokenize(&source).map(|tokens| {
            let lines: String = tokens.iter().map(|token| token.debug() + "\n").collect();
            (lines, false)
        }),
        Emit::Ast | Emit::Js => compile(&source).map(|unit| {
            let mut failed = false;

            if args.check {
                for diagnostic in check(&unit, &source) {
                    failed |= diagnostic.is_error();
                    eprint!("{}", diagnostic.render(&source, &file_name));
                }
            }

            let text = match args.emit {
                Emit::Ast => match unit.to_json() {
                    Ok(json) => format!("{:#}\n", json),
                    Err(err) => {
                        error!("cannot project the syntax tree: {}", err);
                        failed = true;
                        String::new()
                    }
                },
                _ => {
                    let options = GeneratorOptions {
                        indent_width: args.indent,
                        invoke_main: args.run_main,
                        ..GeneratorOptions::default()
                    };
                    Generator::with_options(options).generate(&unit)
                }
            };

            (text, failed)
        }),
    };

    let (text, failed) = match output {
        Ok(output) => output,
        Err(err) => {
            eprint!("{}", render_error(&err, &source, &file_name));
            return 1;
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(err) = fs::write(path, &text) {
                eprintln!("Error: cannot write {}: {}", path.display(), err);
                return 1;
            }
            debug!(path = %path.display(), bytes = text.len(), "wrote output");
        }
        None => print!("{}", text),
    }

    if failed {
        1
    } else {
        0
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
