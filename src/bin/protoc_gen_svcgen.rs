//! protoc plugin: `protoc --svcgen_out=mode=docs:out --svcgen_opt=... calc.proto`.
//!
//! Reads a `CodeGeneratorRequest` on stdin and writes a `CodeGeneratorResponse`
//! on stdout. Failures are reported in the response's `error` field.

use anyhow::Context;
use std::io::{Read, Write};
use svcgen::descriptor::encode_plugin_response;
use svcgen::logging::{init_logging, LogConfig};
use svcgen::plugin::respond;

fn main() -> anyhow::Result<()> {
    if let Err(err) = init_logging(&LogConfig::from_env()) {
        eprintln!("Warning: {err:#}");
    }

    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("Failed to read CodeGeneratorRequest from stdin")?;

    let response = match respond(&input) {
        Ok(files) => encode_plugin_response(Ok(files)),
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Plugin run failed");
            encode_plugin_response(Err(format!("{err:#}")))
        }
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&response)
        .context("Failed to write CodeGeneratorResponse")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
