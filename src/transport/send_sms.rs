use super::grammar::{GatewayReply, ProtocolError, records};
use crate::domain::{DeliveryResult, DeliveryStatus, MaxSplit, OutgoingMessage};

const RECORD_FIELDS: usize = 3;

/// Encode the message fields of a send request (credentials are added by the client).
///
/// `max_split` is appended only when given; the draft must already be validated.
pub fn encode_send_sms_form(
    message: &OutgoingMessage,
    max_split: Option<MaxSplit>,
) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::with_capacity(5);

    params.push((
        OutgoingMessage::TO_FIELD.to_owned(),
        message.unique_recipients().join(","),
    ));
    params.push((
        OutgoingMessage::FROM_FIELD.to_owned(),
        message.sender().to_owned(),
    ));
    params.push((
        OutgoingMessage::MESSAGE_FIELD.to_owned(),
        message.message().to_owned(),
    ));
    params.push((
        OutgoingMessage::REF_FIELD.to_owned(),
        message.reference().unwrap_or_default().to_owned(),
    ));
    if let Some(max_split) = max_split {
        params.push((MaxSplit::FIELD.to_owned(), max_split.value().to_string()));
    }

    params
}

/// Decode `STATUS:RECIPIENT:DETAIL` records, one per line, or an `ERROR:<reason>` line.
pub fn decode_send_sms_response(
    body: &str,
) -> Result<GatewayReply<Vec<DeliveryResult>>, ProtocolError> {
    let mut results = Vec::new();

    for record in records(body) {
        if let Some(reason) = record.gateway_error() {
            return Ok(GatewayReply::Rejected { reason });
        }

        let fields = record.fields(RECORD_FIELDS)?;
        results.push(DeliveryResult {
            status: DeliveryStatus::parse(fields[0]),
            recipient: fields[1].to_owned(),
            detail: fields[2].to_owned(),
        });
    }

    if results.is_empty() {
        return Err(ProtocolError::EmptyResponse);
    }
    Ok(GatewayReply::Accepted(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn encode_send_form_params_in_fixed_order() {
        let msg = OutgoingMessage::new()
            .with_recipients(["0400000000", "0411111111", "0400000000"])
            .with_sender("MyShop")
            .with_message("hello")
            .with_reference("order-17");

        let params = encode_send_sms_form(&msg, Some(MaxSplit::SINGLE));

        assert_eq!(
            params,
            vec![
                ("to".to_owned(), "0400000000,0411111111".to_owned()),
                ("from".to_owned(), "MyShop".to_owned()),
                ("message".to_owned(), "hello".to_owned()),
                ("ref".to_owned(), "order-17".to_owned()),
                ("maxsplit".to_owned(), "1".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_send_form_keeps_empty_sender_and_reference() {
        let msg = OutgoingMessage::new()
            .with_recipient("0400000000")
            .with_message("hello");

        let params = encode_send_sms_form(&msg, None);

        assert_eq!(param(&params, "from"), Some(""));
        assert_eq!(param(&params, "ref"), Some(""));
        assert_eq!(param(&params, "maxsplit"), None);
    }

    #[test]
    fn decode_records_in_line_order() {
        let body = "OK:0400000000:REF123\nBAD:0411111111:Invalid number\n";

        let reply = decode_send_sms_response(body).unwrap();

        assert_eq!(
            reply,
            GatewayReply::Accepted(vec![
                DeliveryResult {
                    status: DeliveryStatus::Ok,
                    recipient: "0400000000".to_owned(),
                    detail: "REF123".to_owned(),
                },
                DeliveryResult {
                    status: DeliveryStatus::Bad,
                    recipient: "0411111111".to_owned(),
                    detail: "Invalid number".to_owned(),
                },
            ])
        );
    }

    #[test]
    fn decode_trims_padded_fields() {
        let body = "OK: 61400000000: 2942a4af3b\r\n";
        let GatewayReply::Accepted(results) = decode_send_sms_response(body).unwrap() else {
            panic!("expected accepted reply");
        };
        assert_eq!(results[0].recipient, "61400000000");
        assert_eq!(results[0].detail, "2942a4af3b");
    }

    #[test]
    fn decode_passes_unknown_status_through() {
        let GatewayReply::Accepted(results) =
            decode_send_sms_response("QUEUED:0400000000:later").unwrap()
        else {
            panic!("expected accepted reply");
        };
        assert_eq!(
            results[0].status,
            DeliveryStatus::Unknown("QUEUED".to_owned())
        );
    }

    #[test]
    fn decode_error_line_as_rejection() {
        assert_eq!(
            decode_send_sms_response("ERROR:Invalid login").unwrap(),
            GatewayReply::Rejected {
                reason: "Invalid login".to_owned()
            }
        );
    }

    #[test]
    fn decode_error_line_after_records_rejects_whole_reply() {
        assert_eq!(
            decode_send_sms_response("OK:0400000000:REF123\nERROR:Invalid login\n").unwrap(),
            GatewayReply::Rejected {
                reason: "Invalid login".to_owned()
            }
        );
    }

    #[test]
    fn decode_rejects_record_missing_a_field() {
        let body = "OK:0400000000:REF123\nBAD:0411111111\n";
        assert_eq!(
            decode_send_sms_response(body),
            Err(ProtocolError::MissingField {
                line: 2,
                expected: 3,
                content: "BAD:0411111111".to_owned(),
            })
        );
    }

    #[test]
    fn decode_rejects_blank_body() {
        assert_eq!(
            decode_send_sms_response(" \n\n"),
            Err(ProtocolError::EmptyResponse)
        );
    }
}
