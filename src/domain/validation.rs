use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NoRecipients,
    SenderTooLong { max: usize, actual: usize },
    MessageTooLong { chars: usize, parts: usize, max: u8 },
    SplitOutOfRange { min: u8, max: u8, actual: u8 },
    InvalidPhoneNumber { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRecipients => write!(f, "no recipients"),
            Self::SenderTooLong { max, actual } => {
                write!(f, "sender too long: {actual} characters (max {max})")
            }
            Self::MessageTooLong { chars, parts, max } => {
                write!(
                    f,
                    "message too long for split policy: {chars} characters need {parts} parts (max {max})"
                )
            }
            Self::SplitOutOfRange { min, max, actual } => {
                write!(f, "max split out of range: {actual} (expected {min}..={max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}
