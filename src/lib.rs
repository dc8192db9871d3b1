//! Summarizes the commits made since the previous release tag into a chat
//! notification.
//!
//! The `Notifier` asks git for the previous tag and the commits after it,
//! parses each `author || subject || body` line into a `Commit`, and renders
//! them into a message mentioning the authors and linking their issues.
//!
//! ```no_run
//! # use release_notify::{Notifier, exec::ProcessExecutor};
//! let notifier = Notifier::new().unwrap();
//! let message = notifier.run(&ProcessExecutor::new()).unwrap();
//! ```

extern crate indexmap;
extern crate regex;
extern crate toml;

#[macro_use]
mod macros;
mod authors;
mod config;
pub mod error;
pub mod exec;
pub mod fmt;
pub mod git;
pub mod host;
mod issue;
mod notify;

pub use authors::Authors;
pub use git::{Commit, Commits};
pub use issue::IssueMatcher;
pub use notify::Notifier;

// The default config file
const DEFAULT_CONFIG_FILE: &str = ".release-notify.toml";
