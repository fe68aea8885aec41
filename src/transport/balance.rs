use super::grammar::{GatewayReply, ProtocolError, records};
use crate::domain::Balance;

const ACTION_FIELD: &str = "action";
const BALANCE_ACTION: &str = "balance";
const RECORD_FIELDS: usize = 2;

pub fn encode_balance_form() -> Vec<(String, String)> {
    vec![(ACTION_FIELD.to_owned(), BALANCE_ACTION.to_owned())]
}

/// Decode the `STATUS:VALUE` line of a balance query. Only the first non-blank line is read.
pub fn decode_balance_response(body: &str) -> Result<GatewayReply<Balance>, ProtocolError> {
    let record = records(body).next().ok_or(ProtocolError::EmptyResponse)?;

    if let Some(reason) = record.gateway_error() {
        return Ok(GatewayReply::Rejected { reason });
    }

    let fields = record.fields(RECORD_FIELDS)?;
    let value = fields[1];
    let credits = value
        .parse::<i64>()
        .map_err(|_| ProtocolError::InvalidBalance {
            value: value.to_owned(),
        })?;

    Ok(GatewayReply::Accepted(Balance::new(credits)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_form_sets_action() {
        assert_eq!(
            encode_balance_form(),
            vec![("action".to_owned(), "balance".to_owned())]
        );
    }

    #[test]
    fn decode_balance_accepts_any_non_error_status() {
        assert_eq!(
            decode_balance_response("SUCCESS:42").unwrap(),
            GatewayReply::Accepted(Balance::new(42))
        );
        assert_eq!(
            decode_balance_response("OK: 1250\n").unwrap(),
            GatewayReply::Accepted(Balance::new(1250))
        );
    }

    #[test]
    fn decode_balance_error_as_rejection() {
        assert_eq!(
            decode_balance_response("ERROR:Invalid login").unwrap(),
            GatewayReply::Rejected {
                reason: "Invalid login".to_owned()
            }
        );
    }

    #[test]
    fn decode_balance_rejects_non_numeric_value() {
        assert_eq!(
            decode_balance_response("OK:lots"),
            Err(ProtocolError::InvalidBalance {
                value: "lots".to_owned()
            })
        );
    }

    #[test]
    fn decode_balance_rejects_missing_value() {
        assert!(matches!(
            decode_balance_response("OK"),
            Err(ProtocolError::MissingField { line: 1, .. })
        ));
        assert_eq!(
            decode_balance_response(""),
            Err(ProtocolError::EmptyResponse)
        );
    }
}
