//! Simple command that prints one or '-n count' GUID strings
//!
//! Prints COMB GUIDs by default; '-s step' switches to a sequential generator with a random seed.
//! Set `RUST_LOG=debug` to see the library's log output.

use std::{env, io, io::Write, process::ExitCode};

#[derive(Debug, Default)]
struct Options {
    count: Option<usize>,
    step: Option<u8>,
}

fn main() -> io::Result<ExitCode> {
    env_logger::init();

    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [-s step]",
                    program.as_deref().unwrap_or("seqguid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let count = opts.count.unwrap_or(1);
    let mut buf = io::BufWriter::new(io::stdout());
    match opts.step {
        None => {
            for _ in 0..count {
                writeln!(buf, "{}", seqguid::comb())?;
            }
        }
        Some(step) => {
            let g = match seqguid::SequentialGenerator::new(step) {
                Ok(g) => g,
                Err(err) => {
                    eprintln!("Error: {}", err);
                    return Ok(ExitCode::FAILURE);
                }
            };
            for e in g.iter().take(count) {
                writeln!(buf, "{}", e)?;
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        let name = match arg.as_str() {
            "-n" => 'n',
            "-s" => 's',
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        };
        let Some(value) = args.next() else {
            return Err(format!("argument to option '{}' missing", name));
        };
        let duplicate = match name {
            'n' => opts.count.replace(parse_value(name, &value)?).is_some(),
            _ => opts.step.replace(parse_value(name, &value)?).is_some(),
        };
        if duplicate {
            return Err(format!("option '{}' given more than once", name));
        }
    }
    Ok(opts)
}

fn parse_value<T: std::str::FromStr>(name: char, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid argument to option '{}': '{}'", name, value))
}
