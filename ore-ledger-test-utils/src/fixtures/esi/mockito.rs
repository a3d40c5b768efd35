//! ESI HTTP mock endpoint creation utilities.
//!
//! The client always sends a `datasource` query parameter, so every mock accepts any query.

use mockito::{Matcher, Mock};

use crate::fixtures::esi::{factory, EsiFixtures};

impl<'a> EsiFixtures<'a> {
    /// Create a mock HTTP endpoint returning type information for `type_id`.
    pub fn create_type_endpoint(&mut self, type_id: i64, expected_requests: usize) -> Mock {
        let url = format!("/universe/types/{}/", type_id);

        self.context
            .server
            .mock("GET", url.as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(factory::mock_type(type_id).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock HTTP endpoint that fails type lookups for `type_id` with `status`.
    pub fn create_type_error_endpoint(
        &mut self,
        type_id: i64,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/universe/types/{}/", type_id);

        self.context
            .server
            .mock("GET", url.as_str())
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Type not found!"}"#)
            .expect(expected_requests)
            .create()
    }

    /// Create a mock HTTP endpoint for mail sent by `sender_id` to `recipient_id`.
    ///
    /// Only requests whose body addresses `recipient_id` match, so several recipients can be
    /// given different responses.
    pub fn create_mail_endpoint(
        &mut self,
        sender_id: i64,
        recipient_id: i64,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/characters/{}/mail/", sender_id);
        let body = if status < 300 { "1337" } else { r#"{"error":"Mail failed"}"# };

        self.context
            .server
            .mock("POST", url.as_str())
            .match_query(Matcher::Any)
            .match_body(Matcher::Regex(format!(
                r#""recipient_id":{}[,}}]"#,
                recipient_id
            )))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create()
    }
}
