//! Line-oriented response grammar shared by every gateway endpoint.

/// Status field value the gateway uses to reject a whole request.
pub const ERROR_STATUS: &str = "ERROR";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// The response body did not match the gateway's text protocol.
pub enum ProtocolError {
    #[error("empty response")]
    EmptyResponse,

    #[error("line {line}: expected {expected} colon-separated fields, got {content:?}")]
    MissingField {
        line: usize,
        expected: usize,
        content: String,
    },

    #[error("balance is not an integer: {value:?}")]
    InvalidBalance { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded reply: either the payload, or the gateway's own `ERROR:` rejection.
pub enum GatewayReply<T> {
    Accepted(T),
    Rejected { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// 1-based line number within the body.
    pub line: usize,
    pub content: &'a str,
}

impl<'a> Record<'a> {
    /// Split into at most `expected` trimmed fields; the last field keeps any extra colons.
    pub fn fields(&self, expected: usize) -> Result<Vec<&'a str>, ProtocolError> {
        let fields = self
            .content
            .splitn(expected, ':')
            .map(str::trim)
            .collect::<Vec<_>>();
        if fields.len() != expected {
            return Err(ProtocolError::MissingField {
                line: self.line,
                expected,
                content: self.content.to_owned(),
            });
        }
        Ok(fields)
    }

    /// Reason text if this record is an `ERROR:<reason>` line.
    pub fn gateway_error(&self) -> Option<String> {
        let mut parts = self.content.splitn(2, ':');
        let status = parts.next().map(str::trim)?;
        if status != ERROR_STATUS {
            return None;
        }
        Some(parts.next().map(str::trim).unwrap_or_default().to_owned())
    }
}

/// Non-blank lines of a response body, trimmed.
pub fn records(body: &str) -> impl Iterator<Item = Record<'_>> {
    body.split('\n')
        .enumerate()
        .map(|(idx, content)| Record {
            line: idx + 1,
            content: content.trim(),
        })
        .filter(|record| !record.content.is_empty())
}
