use std::io::{self, Write};

use assetq_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for envelope in &output.envelopes {
        match format {
            OutputFormat::Json => {
                // NDJSON lines are never pretty-printed.
                let payload = if pretty && !output.line_delimited {
                    serde_json::to_string_pretty(envelope)?
                } else {
                    serde_json::to_string(envelope)?
                };
                writeln!(out, "{payload}")?;
            }
            OutputFormat::Table => write_table(&mut out, envelope)?,
        }
    }

    out.flush()?;
    Ok(())
}

fn write_table<W: Write>(out: &mut W, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    if let Some(operation) = envelope.meta.operation {
        writeln!(out, "operation   : {operation}")?;
    }
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;
    if let Some(version) = envelope.meta.snapshot_version {
        writeln!(out, "snapshot    : {version}")?;
    }
    writeln!(out, "latency_ms  : {}", envelope.meta.latency_ms)?;

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    if let Some(data) = &envelope.data {
        writeln!(out, "data:")?;
        write_data(out, data)?;
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            writeln!(out, "  - {}: {}", error.code, error.message)?;
        }
    }

    Ok(())
}

fn write_data<W: Write>(out: &mut W, data: &Value) -> Result<(), CliError> {
    let Value::Object(fields) = data else {
        writeln!(out, "  {data}")?;
        return Ok(());
    };

    let width = fields.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in fields {
        let rendered = match value {
            Value::String(text) => text.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        };
        writeln!(out, "  {key:<width$} : {rendered}")?;
    }

    Ok(())
}
