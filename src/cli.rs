use std::path::PathBuf;

use clap::Parser;

/// Demo program that restarts itself whenever its binary is rebuilt.
///
/// Prints its PID and arguments on every start, so a restart shows up as the
/// same PID running again with only the binary path as argument.
#[derive(Parser, Debug)]
#[command(name = "reload-demo", version, about, long_about = None)]
pub struct Cli {
    /// Extra directory to watch (repeatable). Changes are printed.
    #[arg(long = "watch", value_name = "DIR")]
    pub watch: Vec<PathBuf>,

    /// Restart instead of printing when an extra directory changes.
    #[arg(long)]
    pub restart_on_watch: bool,

    /// Milliseconds to wait between detecting a rebuild and restarting.
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Configuration file; missing is fine.
    #[arg(long, value_name = "FILE", default_value = "reload.toml")]
    pub config: PathBuf,

    /// Log debug details (ignored events, registrations) to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}
