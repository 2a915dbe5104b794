//! # svgpath CLI
//!
//! Usage:
//!   svgpath "M 0 0 A 10 10 0 0 1 20 0"
//!   echo "M 0 0 L 10 10" | svgpath --json
//!   svgpath "M 0 0 L 10 0" -t "scale(2) rotate(90)" -p 4
//!   svgpath "M 0 0 Q 5 10 10 0" --length

use std::env;
use std::io::{self, Read};
use std::process;

use svgpath::path::measure;
use svgpath::{dump, parse_path_with_transform, Transform};
use tracing::{debug, warn, Level};

struct Options {
    data: Option<String>,
    transform: Option<String>,
    precision: usize,
    json: bool,
    length: bool,
    verbose: bool,
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("✗ {}", msg);
            eprintln!("usage: svgpath [PATH_DATA] [-t TRANSFORM] [-p PRECISION] [--json] [--length] [-v]");
            process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if options.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    // Read input
    let data = match options.data {
        Some(d) => d,
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("✗ Failed to read stdin: {}", e);
                process::exit(1);
            }
            buf
        }
    };
    if data.trim().is_empty() {
        warn!("no path data given; output is empty");
    }

    let transform = match options.transform.as_deref().map(Transform::parse) {
        None => Transform::identity(),
        Some(Ok(t)) => t,
        Some(Err(e)) => {
            eprintln!("✗ Failed to parse transform: {}", e);
            process::exit(1);
        }
    };
    debug!(transform = %transform.to_svg(), "using transform");

    let path = match parse_path_with_transform(&data, &transform) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("✗ Failed to parse path: {}", e);
            process::exit(1);
        }
    };
    debug!(
        primitives = path.len(),
        subpaths = path.subpath_count(),
        "parsed path"
    );

    if options.length {
        println!("{:.*}", options.precision, measure::total_length(&path));
    } else if options.json {
        match serde_json::to_string_pretty(&path) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("✗ Failed to serialize path: {}", e);
                process::exit(1);
            }
        }
    } else {
        print!("{}", dump(&path, options.precision));
    }
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        data: None,
        transform: None,
        precision: svgpath::path::dump::DEFAULT_PRECISION,
        json: false,
        length: false,
        verbose: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-t" | "--transform" => {
                let value = iter.next().ok_or("--transform needs a value")?;
                options.transform = Some(value.clone());
            }
            "-p" | "--precision" => {
                let value = iter.next().ok_or("--precision needs a value")?;
                options.precision = value
                    .parse()
                    .map_err(|_| format!("invalid precision {:?}", value))?;
            }
            "--json" => options.json = true,
            "--length" => options.length = true,
            "-v" | "--verbose" => options.verbose = true,
            // Path data may legitimately start with '-' only after a command
            // letter, so anything else starting with "--" is an unknown flag.
            other if other.starts_with("--") => {
                return Err(format!("unknown option {}", other));
            }
            other => {
                if options.data.is_some() {
                    return Err("more than one path data argument".to_string());
                }
                options.data = Some(other.to_string());
            }
        }
    }

    Ok(options)
}
