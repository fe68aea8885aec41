use std::collections::HashSet;

use crate::domain::validation::ValidationError;
use crate::domain::value::MaxSplit;

/// Longest sender id the gateway accepts, in characters.
pub const SENDER_MAX_CHARS: usize = 11;
/// Capacity of a single, unfragmented SMS.
pub const SINGLE_SMS_CHARS: usize = 160;
/// Usable payload of each part once a message is fragmented.
pub const MULTIPART_SEGMENT_CHARS: usize = 153;

/// Number of parts needed for a message of `chars` characters.
///
/// Not capped: callers compare the result against [`MaxSplit::MAX`].
pub fn derive_split(chars: usize) -> usize {
    if chars <= SINGLE_SMS_CHARS {
        1
    } else {
        chars.div_ceil(MULTIPART_SEGMENT_CHARS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Draft of an outgoing SMS: recipients, sender id, body, reference and split policy.
///
/// Nothing is validated while the draft is being assembled; [`OutgoingMessage::validate`]
/// runs the pre-send checks. A draft is not meant to be shared while a send is in flight;
/// clone it if several tasks need their own copy.
pub struct OutgoingMessage {
    recipients: Vec<String>,
    sender: String,
    message: String,
    reference: Option<String>,
    max_split: Option<MaxSplit>,
}

impl OutgoingMessage {
    /// Form field name for the recipient list (`to`).
    pub const TO_FIELD: &'static str = "to";
    /// Form field name for the sender id (`from`).
    pub const FROM_FIELD: &'static str = "from";
    /// Form field name for the body (`message`).
    pub const MESSAGE_FIELD: &'static str = "message";
    /// Form field name for the caller's tracking tag (`ref`).
    pub const REF_FIELD: &'static str = "ref";

    pub fn new() -> Self {
        Self::default()
    }

    /// Append a recipient. Numbers are passed through unchecked.
    pub fn with_recipient(mut self, number: impl Into<String>) -> Self {
        self.add_recipient(number);
        self
    }

    pub fn with_recipients<I, S>(mut self, numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recipients.extend(numbers.into_iter().map(Into::into));
        self
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Pin the split count instead of deriving it from the message length.
    pub fn with_max_split(mut self, max_split: MaxSplit) -> Self {
        self.max_split = Some(max_split);
        self
    }

    pub fn add_recipient(&mut self, number: impl Into<String>) {
        self.recipients.push(number.into());
    }

    pub fn set_sender(&mut self, sender: impl Into<String>) {
        self.sender = sender.into();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn set_reference(&mut self, reference: Option<String>) {
        self.reference = reference;
    }

    pub fn set_max_split(&mut self, max_split: Option<MaxSplit>) {
        self.max_split = max_split;
    }

    /// Recipients in insertion order, duplicates included.
    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Recipients with duplicates removed, keeping the first occurrence of each.
    pub fn unique_recipients(&self) -> Vec<&str> {
        let mut seen = HashSet::with_capacity(self.recipients.len());
        self.recipients
            .iter()
            .map(String::as_str)
            .filter(|number| seen.insert(*number))
            .collect()
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// The explicit split override, if any.
    pub fn max_split(&self) -> Option<MaxSplit> {
        self.max_split
    }

    /// Message length in characters (Unicode scalar values).
    pub fn char_count(&self) -> usize {
        self.message.chars().count()
    }

    /// Split count that will be sent: the explicit override, or one derived from length.
    pub fn effective_split(&self) -> Result<MaxSplit, ValidationError> {
        if let Some(explicit) = self.max_split {
            return Ok(explicit);
        }

        let chars = self.char_count();
        let parts = derive_split(chars);
        match u8::try_from(parts) {
            Ok(count) if count <= MaxSplit::MAX => MaxSplit::new(count),
            _ => Err(ValidationError::MessageTooLong {
                chars,
                parts,
                max: MaxSplit::MAX,
            }),
        }
    }

    /// Run the pre-send checks, stopping at the first violation.
    ///
    /// Order: recipients, sender length, split count. Returns the split count to use.
    pub fn validate(&self) -> Result<MaxSplit, ValidationError> {
        if self.recipients.is_empty() {
            return Err(ValidationError::NoRecipients);
        }

        let sender_chars = self.sender.chars().count();
        if sender_chars > SENDER_MAX_CHARS {
            return Err(ValidationError::SenderTooLong {
                max: SENDER_MAX_CHARS,
                actual: sender_chars,
            });
        }

        self.effective_split()
    }
}
