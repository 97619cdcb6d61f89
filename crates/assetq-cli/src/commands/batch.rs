use assetq_core::{Envelope, EnvelopeMeta, QueryError, QueryService, ServiceRequest};
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;

use crate::cli::BatchArgs;
use crate::error::CliError;

pub async fn run(
    args: &BatchArgs,
    service: &QueryService,
) -> Result<Vec<Envelope<Value>>, CliError> {
    let input = match &args.input {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };

    answer_lines(&input, service).await
}

/// Answer every non-blank NDJSON line concurrently; output keeps input order.
async fn answer_lines(
    input: &str,
    service: &QueryService,
) -> Result<Vec<Envelope<Value>>, CliError> {
    let handles: Vec<JoinHandle<Envelope<Value>>> = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let service = service.clone();
            let line = line.to_owned();
            tokio::spawn(async move { answer_line(&service, index + 1, &line) })
        })
        .collect();

    tracing::debug!(requests = handles.len(), "batch dispatched");

    let mut envelopes = Vec::with_capacity(handles.len());
    for handle in handles {
        envelopes.push(handle.await?);
    }
    Ok(envelopes)
}

fn answer_line(service: &QueryService, line_number: usize, line: &str) -> Envelope<Value> {
    match serde_json::from_str::<ServiceRequest>(line) {
        Ok(request) => service.handle_request(request),
        Err(error) => {
            let error = QueryError::invalid_request(format!("line {line_number}: {error}"));
            tracing::warn!(line = line_number, code = error.code(), "{}", error.message());
            Envelope::failure(
                EnvelopeMeta::new(service.config().schema_version.clone(), None),
                &error,
            )
        }
    }
}
