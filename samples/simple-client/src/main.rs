//! Minimal LEAP client: connect to a processor, wait for the initial
//! enumeration, dump the catalog, then follow zone updates for a while.
//!
//! ```text
//! simple-client --host <host> [--cert <certfile> --key <keyfile>]
//! ```

use std::path::PathBuf;
use std::time::Duration;

use leap_client::{Session, SessionConfig};

struct Args {
    host: String,
    certfile: Option<PathBuf>,
    keyfile: Option<PathBuf>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    Ok(Args {
        host: args.value_from_str("--host")?,
        certfile: args.opt_value_from_str("--cert")?,
        keyfile: args.opt_value_from_str("--key")?,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: simple-client --host <host> [--cert <certfile> --key <keyfile>]");
            std::process::exit(2);
        }
    };

    let mut config = SessionConfig::new(args.host);
    config.certfile = args.certfile;
    config.keyfile = args.keyfile;

    let (session, event_loop) = Session::new(config)?;
    let handle = event_loop.spawn();

    if !session.wait_for_ready().await {
        eprintln!("session closed before becoming ready");
        std::process::exit(1);
    }

    for area in session.areas() {
        println!(
            "area   {:>5}  {}",
            area.leap_id,
            area.name.as_deref().unwrap_or("?")
        );
    }
    for device in session.devices() {
        println!(
            "device {:>5}  {} ({})",
            device.leap_id,
            device.name.as_deref().unwrap_or("?"),
            device.model_number.as_deref().unwrap_or("?")
        );
    }

    // Give the standing zone subscription a moment to deliver levels.
    tokio::time::sleep(Duration::from_secs(5)).await;
    for zone in session.zones() {
        println!(
            "zone   {:>5}  {}  level={:?} fan={:?}",
            zone.leap_id,
            zone.name.as_deref().unwrap_or("?"),
            zone.level,
            zone.fan_speed
        );
    }

    session.close().await;
    handle.await?;
    Ok(())
}
