//! Purpose: Drive the fetch → decode → log sequence for both services.
//! Exports: `ConsumeOptions`, `Target`, `Consumed`, `ConsumeReport`, `consume`.
//! Role: The library-side driver invoked by the CLI.
//! Invariants: Targets run sequentially in declaration order.
//! Invariants: Without `keep_going`, the first failure stops the run.
//! Invariants: Each decoded record is logged exactly once at info level.
#![allow(clippy::result_large_err)]

use tracing::{error, info};

use super::endpoints::Endpoints;
use super::fetch::Fetcher;
use super::records::{Greeting, Quote, Shape};
use crate::core::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Quote,
    Greeting,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::Quote, Target::Greeting];

    pub fn label(self) -> &'static str {
        match self {
            Target::Quote => Quote::NAME,
            Target::Greeting => Greeting::NAME,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConsumeOptions {
    pub endpoints: Endpoints,
    pub name: String,
    pub targets: Vec<Target>,
    pub keep_going: bool,
}

impl ConsumeOptions {
    pub fn new(endpoints: Endpoints, name: impl Into<String>) -> Self {
        Self {
            endpoints,
            name: name.into(),
            targets: Target::ALL.to_vec(),
            keep_going: false,
        }
    }

    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Consumed {
    Quote(Quote),
    Greeting(Greeting),
}

impl Consumed {
    pub fn to_json(&self) -> serde_json::Value {
        let value = match self {
            Consumed::Quote(quote) => serde_json::to_value(quote),
            Consumed::Greeting(greeting) => serde_json::to_value(greeting),
        };
        value.unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Default)]
pub struct ConsumeReport {
    pub records: Vec<Consumed>,
    pub failures: Vec<(Target, Error)>,
}

impl ConsumeReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_first_failure(self) -> Option<Error> {
        self.failures.into_iter().next().map(|(_, err)| err)
    }
}

/// Runs every configured target. Returns `Err` only when `keep_going` is
/// off; otherwise failures are collected in the report.
pub fn consume(fetcher: &Fetcher, options: &ConsumeOptions) -> Result<ConsumeReport, Error> {
    let mut report = ConsumeReport::default();
    for target in &options.targets {
        match consume_one(fetcher, options, *target) {
            Ok(record) => report.records.push(record),
            Err(err) if options.keep_going => {
                error!(record = target.label(), "{err}");
                report.failures.push((*target, err));
            }
            Err(err) => return Err(err),
        }
    }
    Ok(report)
}

fn consume_one(fetcher: &Fetcher, options: &ConsumeOptions, target: Target) -> Result<Consumed, Error> {
    match target {
        Target::Quote => {
            let url = options.endpoints.quote()?;
            let quote = fetch_and_log::<Quote>(fetcher, &url)?;
            Ok(Consumed::Quote(quote))
        }
        Target::Greeting => {
            let url = options.endpoints.greeting(&options.name)?;
            let greeting = fetch_and_log::<Greeting>(fetcher, &url)?;
            Ok(Consumed::Greeting(greeting))
        }
    }
}

fn fetch_and_log<T: Shape>(fetcher: &Fetcher, url: &url::Url) -> Result<T, Error> {
    let record = fetcher.fetch_as::<T>(url)?;
    info!("{record}");
    Ok(record)
}
