//! Typed Rust client for the SMS Broadcast HTTP API.
//!
//! The crate is layered: a domain layer of strong types and pre-send validation,
//! a transport layer for the gateway's form encoding and line-oriented text
//! responses, and a small client layer orchestrating requests over an injectable
//! [`HttpTransport`].
//!
//! ```rust,no_run
//! use smsbroadcast::SmsBroadcastClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsbroadcast::SmsBroadcastError> {
//!     let mut client = SmsBroadcastClient::new("username", "password");
//!     client.add_recipient("0400000000");
//!     client.set_sender("MyCompany");
//!     client.set_message("hello");
//!
//!     for result in client.send().await? {
//!         println!("{} {} {}", result.status, result.recipient, result.detail);
//!     }
//!
//!     let balance = client.check_balance().await?;
//!     println!("credits left: {balance}");
//!     Ok(())
//! }
//! ```
//!
//! A client owns one draft; `send` takes `&mut self`, so the draft cannot be edited
//! while a send is in flight. Use [`OutgoingMessage`] with
//! [`SmsBroadcastClient::send_message`] to submit independent drafts.
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    BoxFuture, DEFAULT_ENDPOINT, HttpTransport, ReqwestTransport, SmsBroadcastClient,
    SmsBroadcastClientBuilder, SmsBroadcastError, SplitMode, TransportFailure,
};
pub use domain::{
    Balance, Credentials, DeliveryResult, DeliveryStatus, MaxSplit, OutgoingMessage, PhoneNumber,
    ValidationError,
};
pub use transport::ProtocolError;
