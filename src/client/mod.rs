// src/client/mod.rs

pub mod types;

use async_trait::async_trait;
use quick_xml::escape::escape;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use self::types::{GetFeedbackRequest, GetFeedbackResponse};

pub const API_ENDPOINT: &str = "https://api.ebay.com/ws/api.dll";
const COMPATIBILITY_LEVEL: &str = "967";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}")]
    Status { status: StatusCode, body: String },
    #[error("malformed response: {source}")]
    Decode {
        source: quick_xml::DeError,
        body: String,
    },
    #[error("api failure {code}: {message}")]
    Api {
        code: String,
        message: String,
        body: String,
    },
}

impl ClientError {
    /// Raw response body, when the failure happened after one was received.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            ClientError::Status { body, .. }
            | ClientError::Decode { body, .. }
            | ClientError::Api { body, .. } => Some(body),
            ClientError::Transport(_) => None,
        }
    }
}

/// One page of the feedback listing. The fetch loop only ever talks to
/// this, so tests can script pages without a network.
#[async_trait]
pub trait FeedbackSource: Send + Sync {
    async fn feedback_page(
        &self,
        req: &GetFeedbackRequest,
    ) -> Result<GetFeedbackResponse, ClientError>;
}

/// eBay Trading API client. Calls are plain XML-over-POST against a single
/// endpoint, authenticated by four credential headers plus a token inside
/// the request body.
pub struct TradingClient {
    http: Client,
    endpoint: String,
    app_id: String,
    dev_id: String,
    cert_id: String,
    token: String,
    site_id: String,
}

impl TradingClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            endpoint: API_ENDPOINT.to_string(),
            app_id: config.app_id.clone(),
            dev_id: config.dev_id.clone(),
            cert_id: config.cert_id.clone(),
            token: config.token.clone(),
            site_id: config.site_id.clone(),
        }
    }

    fn envelope(&self, req: &GetFeedbackRequest) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<GetFeedbackRequest xmlns="urn:ebay:apis:eBLBaseComponents">
  <RequesterCredentials>
    <eBayAuthToken>{token}</eBayAuthToken>
  </RequesterCredentials>
  <DetailLevel>{detail_level}</DetailLevel>
  <FeedbackType>{feedback_type}</FeedbackType>
  <Pagination>
    <EntriesPerPage>{entries_per_page}</EntriesPerPage>
    <PageNumber>{page_number}</PageNumber>
  </Pagination>
</GetFeedbackRequest>"#,
            token = escape(self.token.as_str()),
            detail_level = escape(req.detail_level.as_str()),
            feedback_type = req.feedback_type.as_str(),
            entries_per_page = req.entries_per_page,
            page_number = req.page_number,
        )
    }
}

#[async_trait]
impl FeedbackSource for TradingClient {
    async fn feedback_page(
        &self,
        req: &GetFeedbackRequest,
    ) -> Result<GetFeedbackResponse, ClientError> {
        debug!(page = req.page_number, "sending GetFeedback request");
        let resp = self
            .http
            .post(&self.endpoint)
            .header("X-EBAY-API-COMPATIBILITY-LEVEL", COMPATIBILITY_LEVEL)
            .header("X-EBAY-API-CALL-NAME", "GetFeedback")
            .header("X-EBAY-API-SITEID", &self.site_id)
            .header("X-EBAY-API-APP-NAME", &self.app_id)
            .header("X-EBAY-API-DEV-NAME", &self.dev_id)
            .header("X-EBAY-API-CERT-NAME", &self.cert_id)
            .header("Content-Type", "text/xml")
            .body(self.envelope(req))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status { status, body });
        }

        let decoded: GetFeedbackResponse = quick_xml::de::from_str(&body)
            .map_err(|source| ClientError::Decode {
                source,
                body: body.clone(),
            })?;
        if decoded.is_failure() {
            let (code, message) = decoded.first_error();
            return Err(ClientError::Api {
                code,
                message,
                body,
            });
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::types::FeedbackType;

    fn test_client(token: &str) -> TradingClient {
        TradingClient::new(
            Client::new(),
            &Config {
                app_id: "app".into(),
                dev_id: "dev".into(),
                cert_id: "cert".into(),
                token: token.into(),
                base_url: "https://www.ebay.co.uk".into(),
                site_id: "3".into(),
            },
        )
    }

    #[test]
    fn envelope_carries_pagination_and_token() {
        let client = test_client("secret-token");
        let req = GetFeedbackRequest::page(FeedbackType::FeedbackReceived, 200, 4);
        let xml = client.envelope(&req);
        assert!(xml.contains("<eBayAuthToken>secret-token</eBayAuthToken>"));
        assert!(xml.contains("<DetailLevel>ReturnAll</DetailLevel>"));
        assert!(xml.contains("<FeedbackType>FeedbackReceived</FeedbackType>"));
        assert!(xml.contains("<EntriesPerPage>200</EntriesPerPage>"));
        assert!(xml.contains("<PageNumber>4</PageNumber>"));
    }

    #[test]
    fn envelope_escapes_token_markup() {
        let client = test_client("a<b&c");
        let req = GetFeedbackRequest::page(FeedbackType::FeedbackReceived, 200, 1);
        let xml = client.envelope(&req);
        assert!(xml.contains("<eBayAuthToken>a&lt;b&amp;c</eBayAuthToken>"));
    }

    #[test]
    fn response_body_is_exposed_for_logging() {
        let err = ClientError::Api {
            code: "931".into(),
            message: "bad token".into(),
            body: "<xml/>".into(),
        };
        assert_eq!(err.response_body(), Some("<xml/>"));

        let err = ClientError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "oops".into(),
        };
        assert_eq!(err.response_body(), Some("oops"));
    }
}
