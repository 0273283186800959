use std::{process, sync::Arc};

use clap::Parser;
use console::style;
use log::info;

use dailynav::{default_config_path, App, Cli, Config, HttpKernel, Result};

pub fn initialize_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    let mut config = Config::load(&config_path)?;

    // Per-invocation overrides, not persisted
    if let Some(url) = cli.url {
        config.kernel_url = url;
    }
    if let Some(token) = cli.token {
        config.api_token = Some(token);
    }

    let kernel = Arc::new(HttpKernel::new(
        &config.kernel_url,
        config.api_token.clone(),
        config.get_opener_command(),
    ));

    let mut app = App::new(kernel, config, config_path, cli.verbose);
    app.run(cli.command).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    info!("Application starting up");

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", style("error:").red().bold(), e);
        process::exit(1);
    }
}
