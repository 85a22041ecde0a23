//! Print LiteCore's log output through env_logger
//!
//! Loads LiteCore at runtime, routes its logs into the `log` facade and
//! keeps the process alive until Enter is pressed.
//!
//! Usage:
//!   relay_to_stderr <libLiteCore.so> [level] [--config relay.toml]
//!
//! Example:
//!   RUST_LOG=litecore=trace relay_to_stderr /opt/couchbase/lib/libLiteCore.so verbose

use c4log_relay::{bridge, DynamicFacility, LogLevel, Relay, RelayConfig};
use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_module(bridge::LOG_TARGET, log::LevelFilter::Trace)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut config = RelayConfig::new();
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let Some(path) = iter.next() else {
                eprintln!("--config needs a path");
                process::exit(2);
            };
            config = match RelayConfig::load(&PathBuf::from(path)) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
        } else {
            positional.push(arg.clone());
        }
    }

    if let Some(library) = positional.first() {
        config = config.with_library(library);
    }
    if let Some(level) = positional.get(1) {
        match level.parse::<LogLevel>() {
            Ok(level) => config = config.with_min_level(level),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(2);
            }
        }
    }

    let Some(library) = config.library.clone() else {
        eprintln!("Usage: relay_to_stderr <libLiteCore.so> [level] [--config relay.toml]");
        process::exit(2);
    };

    let facility = match DynamicFacility::open(&library) {
        Ok(facility) => facility.leak(),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let relay = Relay::new(facility);
    if let Err(e) = bridge::install(&relay, config.min_level) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    println!("Relaying LiteCore logs at {} and above; press Enter to stop", config.min_level);
    let _ = io::stdin().lock().lines().next();

    if let Err(e) = relay.disable(LogLevel::NONE) {
        eprintln!("Error: {}", e);
    }
}
