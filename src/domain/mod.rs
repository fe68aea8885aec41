//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    MULTIPART_SEGMENT_CHARS, OutgoingMessage, SENDER_MAX_CHARS, SINGLE_SMS_CHARS, derive_split,
};
pub use response::{Balance, DeliveryResult, DeliveryStatus};
pub use validation::ValidationError;
pub use value::{Credentials, MaxSplit, PhoneNumber};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_phone_number_feeds_the_draft() {
        let phone = PhoneNumber::parse(Some(phonenumber::country::Id::AU), "0400000000").unwrap();
        let msg = OutgoingMessage::new()
            .with_recipient(phone)
            .with_recipient("61400000000")
            .with_message("hi");

        assert_eq!(msg.unique_recipients(), vec!["61400000000"]);
        assert_eq!(msg.validate(), Ok(MaxSplit::SINGLE));
    }

    #[test]
    fn maximum_length_message_fits_seven_parts() {
        let msg = OutgoingMessage::new()
            .with_recipient("0400000000")
            .with_message("x".repeat(MaxSplit::MAX as usize * MULTIPART_SEGMENT_CHARS));
        assert_eq!(msg.validate().map(MaxSplit::value), Ok(MaxSplit::MAX));
    }
}
