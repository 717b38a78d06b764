//! Runs the agent's startup sequence on the process command line and prints
//! the resulting configuration.
//!
//! Try `cargo run --example bootstrap -- -c ./mender.conf -l debug`.
use mender_conf::{MenderConfig, Paths, ProcessLogger};

fn main() {
    let paths = Paths::from_env();
    let mut config = MenderConfig::new(&paths);
    let mut logger = ProcessLogger::new();
    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());

    if let Err(err) = config.process_cmdline_args(args, &paths, &mut logger) {
        eprintln!("error: {}", err);
        if let Some(source) = std::error::Error::source(&err) {
            eprintln!("  cause: {}", source);
        }
        std::process::exit(1);
    }

    log::info!("Configuration bootstrapped");
    println!("data store: {}", config.data_store_dir.display());
    println!("servers: {:?}", config.server_urls());
    println!("{:#?}", config.settings);
}
