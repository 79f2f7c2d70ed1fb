// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job commands: list, show, create, update, delete, run, output

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::{Map, Value};
use viki_core::JobDefinition;
use viki_daemon::Service;

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{print_response, OutputFormat};

#[derive(Subcommand)]
pub enum JobCommand {
    /// List job names
    List,
    /// Show a job definition
    Show {
        /// Job name
        name: String,
    },
    /// Create a job
    Create {
        /// Job name
        name: String,
        #[command(flatten)]
        definition: DefinitionArgs,
    },
    /// Change a job's description, steps or other keys
    Update {
        /// Job name
        name: String,
        #[command(flatten)]
        definition: DefinitionArgs,
    },
    /// Delete a job and its output
    Delete {
        /// Job name
        name: String,
    },
    /// Run a job's steps in order, stopping at the first failure
    Run {
        /// Job name
        name: String,
        /// Arguments appended to every step (after `--`)
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Print the output of the most recent run
    Output {
        /// Job name
        name: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct DefinitionArgs {
    /// Job description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Shell step; repeat for several, they run in the order given
    #[arg(long = "step", short = 's', value_name = "COMMAND")]
    pub steps: Vec<String>,

    /// Read the definition (or patch) from a JSON file
    #[arg(long, short, conflicts_with_all = ["description", "steps"])]
    pub file: Option<PathBuf>,
}

impl DefinitionArgs {
    /// Request body for create/update. Only the keys given are included.
    pub fn into_request(self) -> Result<Value> {
        if let Some(path) = self.file {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON in {}", path.display()));
        }

        let mut data = Map::new();
        if let Some(description) = self.description {
            data.insert("description".to_string(), Value::String(description));
        }
        if !self.steps.is_empty() {
            data.insert(
                "steps".to_string(),
                Value::Array(self.steps.into_iter().map(Value::String).collect()),
            );
        }
        Ok(Value::Object(data))
    }
}

pub async fn handle(command: JobCommand, service: &Service, format: OutputFormat) -> Result<()> {
    match command {
        JobCommand::List => {
            let res = service.list().await;
            print_response(&res, format, 1, |list| {
                if list.jobs.is_empty() {
                    println!("{}", color::context("No jobs"));
                }
                for name in &list.jobs {
                    println!("{name}");
                }
            })
        }
        JobCommand::Show { name } => {
            let res = service.get(&name).await;
            print_response(&res, format, 1, |detail| {
                if let Some(def) = &detail.config {
                    print!("{}", format_job(def));
                }
            })
        }
        JobCommand::Create { name, definition } => {
            let res = service.create(&name, definition.into_request()?).await;
            print_response(&res, format, 1, |_| println!("{}", res.message))
        }
        JobCommand::Update { name, definition } => {
            let res = service.update(&name, definition.into_request()?).await;
            print_response(&res, format, 1, |_| println!("{}", res.message))
        }
        JobCommand::Delete { name } => {
            let res = service.delete(&name).await;
            print_response(&res, format, 1, |_| println!("{}", res.message))
        }
        JobCommand::Run { name, args } => {
            let res = service.run(&name, &args).await;
            let code = ExitError::status_for(res.payload.return_code);
            print_response(&res, format, code, |_| println!("{}", res.message))
        }
        JobCommand::Output { name } => {
            let res = service.output(&name).await;
            print_response(&res, format, 1, |out| print!("{}", out.output))
        }
    }
}

/// Human-readable rendering of a job definition.
pub fn format_job(def: &JobDefinition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", color::header("Job:"), def.name);
    let _ = writeln!(out, "{} {}", color::header("Description:"), def.description);
    let _ = writeln!(
        out,
        "{} {} {}",
        color::header("Runs:"),
        def.run_number,
        color::context(&format!(
            "(last successful: {}, last failed: {})",
            def.last_successful_run, def.last_failed_run
        ))
    );
    let _ = writeln!(out, "{}", color::header("Steps:"));
    if def.steps.is_empty() {
        let _ = writeln!(out, "  {}", color::context("(none)"));
    }
    for (i, step) in def.steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step);
    }
    for (key, value) in &def.extra {
        let _ = writeln!(out, "{} {}", color::header(&format!("{key}:")), value);
    }
    out
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
