use std::io;

use smsbroadcast::SmsBroadcastClient;
use tracing_subscriber::EnvFilter;

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let username = required_env("SMSBROADCAST_USERNAME")?;
    let password = required_env("SMSBROADCAST_PASSWORD")?;
    let to = required_env("SMSBROADCAST_TO")?;
    let sender = std::env::var("SMSBROADCAST_FROM").unwrap_or_default();
    let message = std::env::var("SMSBROADCAST_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsbroadcast demo.".to_owned());

    let mut client = SmsBroadcastClient::new(username, password);
    for number in to.split(',') {
        client.add_recipient(number.trim());
    }
    client.set_sender(sender);
    client.set_message(message);

    for result in client.send().await? {
        println!(
            "status: {}, recipient: {}, detail: {}",
            result.status, result.recipient, result.detail
        );
    }

    Ok(())
}
