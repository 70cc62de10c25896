// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, resolve configuration, build the
//   key store and API client, then hand everything to the resolver.
// - Operation failures are already reported as one line by the resolver;
//   they only change the exit status.

use anyhow::Context;
use env_logger::Env;
use std::io;
use std::process;
use url_shortener::{
    api::ApiClient, args, config::Config, key_store::KeyStore, resolver::Resolver, ui::Spinning,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cmd = match args::parse_from(std::env::args_os()) {
        Ok(cmd) => cmd,
        Err(e) => e.exit(),
    };

    let config = Config::from_env().context("Failed to load configuration")?;
    let store = KeyStore::new(&config.config_dir);
    let api = Spinning::new(ApiClient::from_config(&config)?);

    let ok = Resolver::new(&store, &api)
        .run(&cmd, &mut io::stdout(), &mut io::stderr())
        .context("Failed to write output")?;
    if !ok {
        process::exit(1);
    }
    Ok(())
}
