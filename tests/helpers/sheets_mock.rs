//! Mock Google Sheets API and OAuth token endpoint
//!
//! Records appended rows so tests can assert on exactly what reached the sheet.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, path_regex, query_param},
    Mock, MockServer, ResponseTemplate,
};
use super::test_data::{TEST_SPREADSHEET_ID, TEST_WORKSHEET};

pub struct SheetsMockServer {
    pub server: MockServer,
}

impl SheetsMockServer {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    fn append_path() -> String {
        format!("^/v4/spreadsheets/{}/values/.+:append$", TEST_SPREADSHEET_ID)
    }

    /// Accept appends with a normal API response
    pub async fn mock_append_success(&self) {
        Mock::given(method("POST"))
            .and(path_regex(Self::append_path()))
            .and(query_param("valueInputOption", "RAW"))
            .and(query_param("insertDataOption", "INSERT_ROWS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "spreadsheetId": TEST_SPREADSHEET_ID,
                "tableRange": format!("{}!A1:G1", TEST_WORKSHEET),
                "updates": {
                    "spreadsheetId": TEST_SPREADSHEET_ID,
                    "updatedRange": format!("{}!A2:G2", TEST_WORKSHEET),
                    "updatedRows": 1,
                    "updatedColumns": 7,
                    "updatedCells": 7
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Reject appends with the given status
    pub async fn mock_append_failure(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path_regex(Self::append_path()))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": {
                    "code": status,
                    "message": "Requested entity was not found.",
                    "status": "NOT_FOUND"
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Token endpoint that must be hit exactly `times` times
    pub async fn mock_token_exchange(&self, access_token: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": access_token,
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    async fn append_requests(&self) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.url.path().ends_with(":append"))
            .collect()
    }

    /// Rows sent to the append endpoint, in arrival order
    pub async fn appended_rows(&self) -> Vec<Vec<String>> {
        self.append_requests()
            .await
            .iter()
            .filter_map(|req| serde_json::from_slice::<Value>(&req.body).ok())
            .filter_map(|body| body["values"].as_array().cloned())
            .flatten()
            .filter_map(|row| serde_json::from_value::<Vec<String>>(row).ok())
            .collect()
    }

    /// Authorization headers seen on append requests
    pub async fn authorization_headers(&self) -> Vec<String> {
        self.append_requests()
            .await
            .iter()
            .filter_map(|req| req.headers.get("authorization"))
            .filter_map(|value| value.to_str().ok().map(str::to_string))
            .collect()
    }

    /// Raw form bodies posted to the token endpoint
    pub async fn token_requests(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path() == "/token")
            .map(|req| String::from_utf8_lossy(&req.body).into_owned())
            .collect()
    }
}
