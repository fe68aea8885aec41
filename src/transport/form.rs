use url::form_urlencoded;

/// Percent-encode ordered form fields into an `application/x-www-form-urlencoded` body.
pub fn encode_form_body(params: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_in_given_order_with_form_escaping() {
        let params = vec![
            ("username".to_owned(), "user@example.com".to_owned()),
            ("to".to_owned(), "0400000000,61411111111".to_owned()),
            ("message".to_owned(), "Hi & bye 100%".to_owned()),
            ("ref".to_owned(), String::new()),
        ];

        assert_eq!(
            encode_form_body(&params),
            "username=user%40example.com&to=0400000000%2C61411111111&message=Hi+%26+bye+100%25&ref="
        );
    }

    #[test]
    fn empty_params_encode_to_empty_body() {
        assert_eq!(encode_form_body(&[]), "");
    }
}
