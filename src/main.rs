use std::{io::stdout, process};

use release_notify::{
    exec::ProcessExecutor,
    host::{GithubActions, Host, Outcome},
    Notifier,
};

fn main() {
    // Logs go to stderr, stdout carries the echo and workflow commands
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut host = GithubActions::new();

    let notifier = match Notifier::discover(host.input("config")) {
        Ok(n) => n,
        Err(e) => {
            host.set_failed(&e.to_string());
            process::exit(1);
        }
    };

    let exec = ProcessExecutor::new().fail_on_exit_status(notifier.fail_on_exit_status);
    if let Outcome::Failure(_) = notifier.report(&exec, &mut host, &mut stdout()) {
        process::exit(1);
    }
}
