//! Transport layer: wire-format details (form encoding and the text response grammar).

mod balance;
mod form;
mod grammar;
mod send_sms;

pub use balance::{decode_balance_response, encode_balance_form};
pub use form::encode_form_body;
pub use grammar::{GatewayReply, ProtocolError};
pub use send_sms::{decode_send_sms_response, encode_send_sms_form};
