//! Purpose: `rest-consumer` CLI entry point.
//! Role: Binary crate root; parses args, fetches the quote and greeting, logs the records.
//! Invariants: Records are logged through `tracing` on stderr; `--format json` adds JSON lines on stdout.
//! Invariants: Fatal errors are plain text on a terminal and JSON on stderr otherwise.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
#![allow(clippy::result_large_err)]
use std::error::Error as StdError;
use std::io::{self, IsTerminal};

use clap::{Parser, ValueEnum, error::ErrorKind as ClapErrorKind};
use rest_consumer::api::{
    ConsumeOptions, DEFAULT_GREETING_URL, DEFAULT_QUOTE_URL, DEFAULT_USER_AGENT, Endpoints, Error,
    ErrorKind, Fetcher, FetcherOptions, Target, consume, to_exit_code,
};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "rest-consumer",
    version,
    about = "Fetch a random quote and a greeting from REST services and log them",
    long_about = None,
    after_help = r#"EXAMPLES
  $ rest-consumer
  $ rest-consumer --name Allison --format json
  $ RUST_LOG=debug rest-consumer --quote-url http://quotes.internal/api/random"#
)]
struct Cli {
    #[arg(
        long,
        env = "REST_CONSUMER_QUOTE_URL",
        default_value = DEFAULT_QUOTE_URL,
        help = "Quote endpoint URL"
    )]
    quote_url: String,
    #[arg(
        long,
        env = "REST_CONSUMER_GREETING_URL",
        default_value = DEFAULT_GREETING_URL,
        help = "Greeting endpoint URL; `{name}` is replaced by --name"
    )]
    greeting_url: String,
    #[arg(
        long,
        env = "REST_CONSUMER_NAME",
        default_value = "User",
        help = "Name passed to the greeting service"
    )]
    name: String,
    #[arg(long, env = "REST_CONSUMER_PROXY", help = "HTTP proxy URL")]
    proxy: Option<String>,
    #[arg(long, default_value = DEFAULT_USER_AGENT, help = "User-Agent header")]
    user_agent: String,
    #[arg(long, value_enum, default_value = "log", help = "Output format")]
    format: OutputFormat,
    #[arg(long, value_enum, help = "Fetch only one of the records")]
    only: Option<OnlyTarget>,
    #[arg(long, help = "Fetch every record even if an earlier one fails")]
    keep_going: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Log,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OnlyTarget {
    Quote,
    Greeting,
}

impl Cli {
    fn targets(&self) -> Vec<Target> {
        match self.only {
            Some(OnlyTarget::Quote) => vec![Target::Quote],
            Some(OnlyTarget::Greeting) => vec![Target::Greeting],
            None => Target::ALL.to_vec(),
        }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                return Ok(RunOutcome::ok());
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Run `rest-consumer --help` for usage."));
            }
        },
    };

    init_tracing();

    let mut fetcher_options = FetcherOptions::new().with_user_agent(cli.user_agent.clone());
    if let Some(proxy) = &cli.proxy {
        fetcher_options = fetcher_options.with_proxy(proxy.clone());
    }
    let fetcher = Fetcher::with_options(fetcher_options).map_err(add_hint)?;

    let options = ConsumeOptions::new(
        Endpoints::new(cli.quote_url.clone(), cli.greeting_url.clone()),
        cli.name.clone(),
    )
    .with_targets(cli.targets())
    .with_keep_going(cli.keep_going);

    let report = consume(&fetcher, &options).map_err(add_hint)?;

    if cli.format == OutputFormat::Json {
        for record in &report.records {
            println!("{}", record.to_json());
        }
    }

    match report.into_first_failure() {
        None => Ok(RunOutcome::ok()),
        Some(err) => Ok(RunOutcome::with_code(to_exit_code(err.kind()))),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .try_init();
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches("error: ").to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

fn add_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::Transport if err.status().is_some() => {
            err.with_hint("The service answered with an error status. Check the endpoint URL.")
        }
        ErrorKind::Transport => err.with_hint(
            "Could not reach the service. Check that it is running, or set --proxy.",
        ),
        ErrorKind::Usage => err.with_hint("Endpoint and proxy URLs must be absolute http(s) URLs."),
        _ => err,
    }
}

fn emit_error(err: &Error) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Transport => "transport error".to_string(),
        ErrorKind::Decode => "decode error".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(url) = err.url() {
        inner.insert("url".to_string(), json!(url));
    }
    if let Some(status) = err.status() {
        inner.insert("status".to_string(), json!(status));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(url) = err.url() {
        lines.push(format!("url: {url}"));
    }
    if let Some(status) = err.status() {
        lines.push(format!("status: {status}"));
    }
    for cause in error_causes(err) {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{Cli, OnlyTarget, add_hint, error_json};
    use clap::Parser;
    use rest_consumer::api::{Error, ErrorKind, Target};

    #[test]
    fn only_flag_narrows_targets() {
        let cli = Cli::try_parse_from(["rest-consumer", "--only", "greeting"]).expect("cli");
        assert_eq!(cli.only, Some(OnlyTarget::Greeting));
        assert_eq!(cli.targets(), vec![Target::Greeting]);
    }

    #[test]
    fn error_json_carries_status_and_url() {
        let err = add_hint(
            Error::new(ErrorKind::Transport)
                .with_message("remote error status 503")
                .with_status(503)
                .with_url("http://localhost:8080/api/random"),
        );
        let value = error_json(&err);
        let inner = value.get("error").expect("error object");
        assert_eq!(inner["kind"], "Transport");
        assert_eq!(inner["status"], 503);
        assert_eq!(inner["url"], "http://localhost:8080/api/random");
        assert!(inner["hint"].as_str().is_some());
    }
}
