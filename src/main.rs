mod cli;
mod config;

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::DemoConfig;
use reload::{ChangeEvent, DEFAULT_DEBOUNCE, Reloader, Watch};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = DemoConfig::load(&cli.config);

    let args: Vec<String> = std::env::args().collect();
    println!("pid={} args={:?}", std::process::id(), args);
    println!("env={} variables", std::env::vars_os().count());

    let debounce = cli
        .debounce_ms
        .or(config.debounce_ms)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_DEBOUNCE);

    let watches = cli
        .watch
        .into_iter()
        .chain(config.watch.unwrap_or_default())
        .map(|dir| {
            if cli.restart_on_watch {
                Watch::restart(dir)
            } else {
                Watch::new(dir, print_change)
            }
        });

    let never = Reloader::new(print_log)
        .debounce(debounce)
        .watches(watches)
        .run()
        .await?;
    match never {}
}

fn print_log(args: fmt::Arguments<'_>) {
    println!("{args}");
}

fn print_change(event: &ChangeEvent) {
    println!("changed: {} ({:?})", event.path.display(), event.op);
}
