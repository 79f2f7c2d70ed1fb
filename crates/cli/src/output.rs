// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;
use viki_core::Response;

use crate::exit_error::ExitError;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a service response.
///
/// JSON mode prints the whole record; text mode hands a successful payload
/// to `render`. A failed response becomes an [`ExitError`] with `exit_code`.
pub fn print_response<T: Serialize>(
    res: &Response<T>,
    format: OutputFormat,
    exit_code: i32,
    render: impl FnOnce(&T),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(res)?);
            if !res.success {
                return Err(ExitError::quiet(exit_code).into());
            }
        }
        OutputFormat::Text => {
            if !res.success {
                return Err(ExitError::new(exit_code, format!("Error: {}", res.message)).into());
            }
            render(&res.payload);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
