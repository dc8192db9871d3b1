use std::{
    env,
    fs::OpenOptions,
    io::{stdout, Write},
};

use log::{debug, warn};

use uuid::Uuid;

use crate::error::{Error, Result};

/// What a run ended with. Exactly one of the two is ever reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The rendered message
    Success(String),
    /// Why the run failed
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool { matches!(self, Outcome::Success(_)) }
}

/// The automation platform the notifier runs under.
pub trait Host {
    /// Publishes a named output value of the run
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;

    /// Marks the run as failed
    fn set_failed(&mut self, reason: &str);
}

/// GitHub Actions, driven through its environment variables and workflow
/// commands.
#[derive(Debug, Default)]
pub struct GithubActions;

impl GithubActions {
    pub fn new() -> Self { GithubActions }

    /// Reads an action input, i.e. the `INPUT_<NAME>` environment variable.
    /// Blank inputs count as missing.
    pub fn input(&self, name: &str) -> Option<String> {
        let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
        env::var(key)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }
}

impl Host for GithubActions {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        match env::var_os("GITHUB_OUTPUT") {
            Some(path) => {
                debug!("Writing output {:?} to {:?}", name, path);
                let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
                let entry = output_entry(name, value, &delimiter)?;
                let mut file = OpenOptions::new().append(true).create(true).open(path)?;
                file.write_all(entry.as_bytes())?;
            }
            None => {
                warn!("GITHUB_OUTPUT is not set, falling back to ::set-output");
                writeln!(stdout(), "::set-output name={name}::{}", escape_data(value))?;
            }
        }
        Ok(())
    }

    fn set_failed(&mut self, reason: &str) {
        println!("::error::{}", escape_data(reason));
    }
}

fn output_entry(name: &str, value: &str, delimiter: &str) -> Result<String> {
    for (what, text) in [("name", name), ("value", value)] {
        if text.contains(delimiter) {
            return Err(Error::OutputDelimiter {
                name: what.to_owned(),
                delimiter: delimiter.to_owned(),
            });
        }
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

// Workflow command values are percent encoded for these characters only
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
