use std::io;
use std::time::Duration;

use smsbroadcast::{Credentials, SmsBroadcastClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let username = std::env::var("SMSBROADCAST_USERNAME").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSBROADCAST_USERNAME environment variable is required",
        )
    })?;
    let password = std::env::var("SMSBROADCAST_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSBROADCAST_PASSWORD environment variable is required",
        )
    })?;

    let client = SmsBroadcastClient::builder(Credentials::new(username, password))
        .timeout(Duration::from_secs(15))
        .build()?;
    let balance = client.check_balance().await?;

    println!("credits: {balance}");

    Ok(())
}
