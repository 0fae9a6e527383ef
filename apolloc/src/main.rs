mod builtins;
mod cli;
mod rlpl;
mod rppl;

use std::path::PathBuf;

use apollo_core::{
    eval::interpret,
    parser::prelude::parse_module,
    utils::prelude::Error,
};
use clap::Parser;
use cli::{print_finished, print_parsing, print_running};

#[derive(Parser)]
enum Command {
    /// Parses and runs a source file
    Run {
        /// Path of source file
        path: PathBuf,
    },
    /// Parses a source file and prints it back
    Parse {
        /// Path of source file
        path: PathBuf,
        /// Print ast instead of parsed source code
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl,
}

fn main() {
    match Command::parse() {
        Command::Run { path } => {
            print_running(path.to_str().unwrap_or_default());
            let start = std::time::Instant::now();

            match interpret(path, builtins::default_builtins()) {
                Ok(_) => print_finished(std::time::Instant::now() - start),
                Err(err) => {
                    report(&err);
                    std::process::exit(1);
                }
            }
        }
        Command::Parse { path, print_ast } => {
            print_parsing(path.to_str().unwrap_or_default());
            let start = std::time::Instant::now();

            let src = match std::fs::read_to_string(&path) {
                Ok(src) => src,
                Err(err) => {
                    report(&Error::StdIo { err: err.kind() });
                    std::process::exit(1);
                }
            };

            match parse_module(&src) {
                Ok(parsed) => {
                    if print_ast {
                        println!("{:#?}", parsed.module.program);
                    } else {
                        println!("{}", parsed.module.program);
                    }

                    print_finished(std::time::Instant::now() - start);
                }
                Err(error) => {
                    report(&Error::Parse { path, src, error });
                    std::process::exit(1);
                }
            }
        }
        Command::Rlpl => {
            let _ = rlpl::start();
        }
        Command::Rppl => {
            let _ = rppl::start();
        }
    }
}

fn report(error: &Error) {
    let buf_writer = cli::stderr_buffer_writer();
    let mut buf = buf_writer.buffer();

    error.pretty(&mut buf);
    buf_writer.print(&buf).expect("Writing error to stderr");
}
