//! bgserve - serve files, directories and snippets over a throwaway HTTP server
//!
//! Registers every argument with a provider, prints one URL per line and
//! serves until interrupted.

#![allow(missing_docs)]

use anyhow::Context;
use bgserve::{
    Config, CreateOptions, LogFormat, LogLevel, Provider, ResourceHandle,
    init_logging_with_format,
};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "bgserve", version, about)]
struct Args {
    /// YAML configuration file
    #[arg(long, env = "BGSERVE_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, 0 for an ephemeral port
    #[arg(long)]
    port: Option<u16>,

    /// Publish proxy-relative URLs
    #[arg(long)]
    proxy: bool,

    /// Omit the permissive CORS headers sent by default
    #[arg(long)]
    no_cors: bool,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: LogLevel,

    /// Log format (text, json)
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    /// Print each registered resource as a JSON object instead of a bare URL
    #[arg(long)]
    json: bool,

    /// Serve a string from memory; repeatable
    #[arg(long = "text", value_name = "STRING")]
    texts: Vec<String>,

    /// Extension for the `--text` value in the same position
    #[arg(long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Files or directories to serve
    paths: Vec<PathBuf>,
}

impl Args {
    async fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .await
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => Config::default(),
        };
        config = config.merge(Config::from_env().context("Invalid environment")?);

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.proxy {
            config.server.proxy = true;
        }
        if self.no_cors {
            config.server.cors.enabled = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging_with_format(args.log_level, args.log_format);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.load_config().await?;
    let provider = Provider::with_config(config, Provider::default_mounts())?;

    let base_url = provider.start()?;
    info!("Serving on {}", base_url);

    for path in &args.paths {
        let handle = provider
            .create(path.as_path())
            .with_context(|| format!("Cannot serve {}", path.display()))?;
        print_handle(&handle, args.json)?;
    }

    for (i, text) in args.texts.iter().enumerate() {
        let mut options = CreateOptions::new();
        if let Some(extension) = args.extensions.get(i) {
            options = options.with_extension(extension.as_str());
        }
        let handle = provider.create_with(text.as_str(), options)?;
        print_handle(&handle, args.json)?;
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Shutting down");

    tokio::task::spawn_blocking(move || provider.stop())
        .await
        .context("Shutdown task failed")?;

    Ok(())
}

fn print_handle(handle: &ResourceHandle, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(handle)?);
    } else {
        println!("{}", handle);
    }
    Ok(())
}
