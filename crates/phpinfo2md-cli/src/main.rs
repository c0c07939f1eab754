use std::io::{self, IsTerminal};

use phpinfo2md_cli::{print_usage, run, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse_args();

    let Some(input) = cli.input.clone() else {
        return print_usage().into();
    };

    init_tracing(cli.quiet);
    run(&cli, &input).into()
}

// Log to stderr so the usage and version output on stdout stays clean.
fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
