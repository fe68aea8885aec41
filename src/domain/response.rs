use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Per-recipient status reported by the gateway.
///
/// Values other than `OK` and `BAD` are preserved in [`DeliveryStatus::Unknown`] so that
/// protocol drift is visible to the caller instead of being folded into a known variant.
pub enum DeliveryStatus {
    Ok,
    Bad,
    Unknown(String),
}

impl DeliveryStatus {
    pub fn parse(value: &str) -> Self {
        Self::known(value).unwrap_or_else(|| Self::Unknown(value.to_owned()))
    }

    fn known(value: &str) -> Option<Self> {
        match value {
            "OK" => Some(Self::Ok),
            "BAD" => Some(Self::Bad),
            _ => None,
        }
    }

    /// Wire representation, as received.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::Bad => "BAD",
            Self::Unknown(value) => value,
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DeliveryStatus {
    fn from(value: String) -> Self {
        Self::known(&value).unwrap_or(Self::Unknown(value))
    }
}

impl From<DeliveryStatus> for String {
    fn from(value: DeliveryStatus) -> Self {
        match value {
            DeliveryStatus::Unknown(value) => value,
            known => known.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Outcome for one recipient of a send request.
///
/// `detail` carries the gateway's message reference on `OK` and the failure reason on
/// `BAD`. All fields are trimmed.
pub struct DeliveryResult {
    pub status: DeliveryStatus,
    pub recipient: String,
    pub detail: String,
}

impl DeliveryResult {
    pub fn is_ok(&self) -> bool {
        self.status == DeliveryStatus::Ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
/// Remaining SMS credits on the account.
pub struct Balance(i64);

impl Balance {
    pub fn new(credits: i64) -> Self {
        Self(credits)
    }

    pub fn credits(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
