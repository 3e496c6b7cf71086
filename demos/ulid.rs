//! Simple command that prints one or '-n count' ULID strings, optionally in the GUID form ('-g')

use std::{env, io, io::Write, process::ExitCode};

#[derive(Debug, Default, PartialEq)]
struct Options {
    count: Option<usize>,
    guid: bool,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [-g]",
                    program.as_deref().unwrap_or("ulid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..opts.count.unwrap_or(1) {
        let ulid = ulid_creator::ulid();
        if opts.guid {
            writeln!(buf, "{}", ulid.encode_guid())?;
        } else {
            writeln!(buf, "{}", ulid)?;
        }
    }
    buf.flush()?;

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-g" => {
                if opts.guid {
                    return Err("option 'g' given more than once".to_owned());
                }
                opts.guid = true;
            }
            "-n" => {
                if opts.count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                opts.count.replace(c);
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    Ok(opts)
}
