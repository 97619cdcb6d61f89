mod baskets;
mod batch;
mod lookup;

use assetq_core::{Envelope, QueryService, ServiceConfigBuilder};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Envelopes produced by one CLI invocation, in output order.
pub struct CommandOutput {
    pub envelopes: Vec<Envelope<Value>>,
    /// True when every envelope is written as a single NDJSON line.
    pub line_delimited: bool,
}

impl CommandOutput {
    fn single(envelope: Envelope<Value>) -> Self {
        Self {
            envelopes: vec![envelope],
            line_delimited: false,
        }
    }

    fn lines(envelopes: Vec<Envelope<Value>>) -> Self {
        Self {
            envelopes,
            line_delimited: true,
        }
    }

    pub fn error_count(&self) -> usize {
        self.envelopes.iter().map(|e| e.errors.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.envelopes.iter().map(|e| e.meta.warnings.len()).sum()
    }
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let service = build_service(cli)?;

    let output = match &cli.command {
        Command::Price(args) => CommandOutput::single(lookup::price(args, &service)),
        Command::Classification(args) => {
            CommandOutput::single(lookup::classification(args, &service))
        }
        Command::Research(args) => CommandOutput::single(lookup::research(args, &service)),
        Command::Baskets(args) => CommandOutput::single(baskets::run(args, &service)?),
        Command::Batch(args) => CommandOutput::lines(batch::run(args, &service).await?),
    };

    Ok(output)
}

fn build_service(cli: &Cli) -> Result<QueryService, CliError> {
    let mut builder = ServiceConfigBuilder::new().with_env()?;
    if let Some(path) = &cli.universe {
        builder = builder.with_universe_path(path);
    }
    if cli.no_negative_growth {
        builder = builder.allow_negative_min_growth(false);
    }
    let config = builder.build();

    if config.universe_path.is_none() {
        return Err(CliError::Command(String::from(
            "no universe snapshot configured: pass --universe or set ASSETQ_UNIVERSE_PATH",
        )));
    }

    Ok(QueryService::from_config(config)?)
}
