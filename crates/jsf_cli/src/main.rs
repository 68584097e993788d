use jsf_core::{
    Error, ErrorKind, Filter, FilterOptions, Policy, Predicate, Replacement, Sink, Stringer, Token,
    TokenizeOptions, tokenize,
};
use log::debug;
use serde_json::Value;
use std::env;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "Usage: jsf [OPTIONS] <PATH> [FILE]";

fn print_help() {
    println!(
        "jsf {VERSION} - streaming JSON filter

{USAGE}

Arguments:
  <PATH>     Path to match, e.g. \"data.items.0\"
  [FILE]     Input file (reads from stdin if omitted)

Options:
  -p, --pick                Keep matched values only (default)
  -i, --ignore              Drop matched values and their keys
  -r, --replace             Replace matched values
  -e, --pattern             Treat <PATH> as a regular expression
  -s, --separator <SEP>     Path separator [default: .]
  -1, --once                Resolve the first match only
      --replacement <JSON>  Replacement values for --replace [default: null]
      --allow-empty         With --replace, drop members whose replacement is empty
      --tokens              Read and write NDJSON token streams
  -h, --help                Show this help message
  -V, --version             Show version

Set RUST_LOG=debug to trace filtering decisions."
    );
}

fn print_version() {
    println!("jsf {VERSION}");
}

#[derive(Debug)]
struct Config {
    path: String,
    file: Option<String>,
    policy: Policy,
    pattern: bool,
    separator: String,
    once: bool,
    replacement: Option<String>,
    tokens: bool,
}

enum ParsedArgs {
    Help,
    Version,
    Filter(Config),
}

fn usage_error(message: &str) -> String {
    format!("{message}\n\n{USAGE}\n\nFor more information, try '--help'")
}

fn parse_args() -> Result<ParsedArgs, String> {
    let mut args = env::args().skip(1);
    let mut positional = Vec::new();
    let mut mode = "pick";
    let mut allow_empty = false;
    let mut pattern = false;
    let mut separator = ".".to_string();
    let mut once = false;
    let mut replacement = None;
    let mut tokens = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParsedArgs::Help),
            "-V" | "--version" => return Ok(ParsedArgs::Version),
            "-p" | "--pick" => mode = "pick",
            "-i" | "--ignore" => mode = "ignore",
            "-r" | "--replace" => mode = "replace",
            "-e" | "--pattern" => pattern = true,
            "-1" | "--once" => once = true,
            "--allow-empty" => allow_empty = true,
            "--tokens" => tokens = true,
            "-s" | "--separator" => {
                separator = args
                    .next()
                    .ok_or_else(|| usage_error("missing value for --separator"))?;
            }
            "--replacement" => {
                replacement = Some(
                    args.next()
                        .ok_or_else(|| usage_error("missing value for --replacement"))?,
                );
            }
            s if s.starts_with('-') && s.len() > 1 => {
                return Err(usage_error(&format!("unknown option: {s}")));
            }
            _ => positional.push(arg),
        }
    }

    let policy = match mode {
        "ignore" => Policy::Ignore,
        "replace" => Policy::Replace { allow_empty },
        _ => Policy::Pick,
    };

    let mut positional = positional.into_iter();
    let Some(path) = positional.next() else {
        return Err(usage_error("missing required argument: <PATH>"));
    };
    let file = positional.next();
    if positional.next().is_some() {
        return Err(usage_error("too many arguments"));
    }

    Ok(ParsedArgs::Filter(Config {
        path,
        file,
        policy,
        pattern,
        separator,
        once,
        replacement,
        tokens,
    }))
}

fn read_input(file: Option<&str>) -> Result<String, String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).map_err(|e| format!("error reading file '{path}': {e}"))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("error reading stdin: {e}"))?;
            Ok(buffer)
        }
    }
}

/// Parse whitespace-separated JSON values
fn parse_values(text: &str) -> Result<Vec<Value>, String> {
    serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .map_err(|e| format!("error parsing JSON: {e}"))
}

/// Parse one token per non-empty line
fn parse_tokens(text: &str) -> Result<Vec<Token>, String> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map_err(|e| format!("error parsing token on line {}: {e}", i + 1))
        })
        .collect()
}

fn build_filter(config: &Config) -> Result<Filter, String> {
    let predicate = if config.pattern {
        Predicate::pattern(&config.path).map_err(|e| e.to_string())?
    } else {
        Predicate::path(config.path.clone())
    };
    let mut options = FilterOptions::new(predicate)
        .separator(config.separator.clone())
        .once(config.once);
    if let Some(text) = &config.replacement {
        let tokenize_options = TokenizeOptions::default();
        let tokens = parse_values(text)?
            .iter()
            .flat_map(|value| tokenize(value, &tokenize_options))
            .collect::<Vec<_>>();
        options = options.replacement(Replacement::tokens(tokens));
    }
    Ok(Filter::new(options, config.policy))
}

/// Writes each token as one line of JSON
struct TokenWriter<W: Write> {
    out: W,
}

impl<W: Write> Sink for TokenWriter<W> {
    fn push(&mut self, token: Token) -> Result<(), Error> {
        serde_json::to_writer(&mut self.out, &token)
            .map_err(|e| Error::new(ErrorKind::Sink, format!("write error: {e}")))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| Error::new(ErrorKind::Sink, format!("write error: {e}")))
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let config = match args {
        ParsedArgs::Help => {
            print_help();
            return Ok(());
        }
        ParsedArgs::Version => {
            print_version();
            return Ok(());
        }
        ParsedArgs::Filter(config) => config,
    };
    debug!("{config:?}");

    let mut filter = build_filter(&config)?;
    let input = read_input(config.file.as_deref())?;
    let stdout = BufWriter::new(io::stdout().lock());

    if config.tokens {
        let mut sink = TokenWriter { out: stdout };
        filter
            .push_all(parse_tokens(&input)?, &mut sink)
            .map_err(|e| format!("error filtering: {e}"))?;
        sink.out
            .flush()
            .map_err(|e| format!("error writing output: {e}"))?;
    } else {
        let mut sink = Stringer::new(stdout);
        let options = TokenizeOptions::default();
        for value in parse_values(&input)? {
            filter
                .push_all(tokenize(&value, &options), &mut sink)
                .map_err(|e| format!("error filtering: {e}"))?;
        }
        sink.finish()
            .map_err(|e| format!("error writing output: {e}"))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("jsf: {e}");
            ExitCode::FAILURE
        }
    }
}
