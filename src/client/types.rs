// src/client/types.rs

use serde::Deserialize;

/// Which side of the feedback ledger `GetFeedback` should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackType {
    FeedbackReceived,
    FeedbackLeft,
    FeedbackReceivedAsSeller,
    FeedbackReceivedAsBuyer,
}

impl FeedbackType {
    pub fn as_str(&self) -> &str {
        match self {
            FeedbackType::FeedbackReceived => "FeedbackReceived",
            FeedbackType::FeedbackLeft => "FeedbackLeft",
            FeedbackType::FeedbackReceivedAsSeller => "FeedbackReceivedAsSeller",
            FeedbackType::FeedbackReceivedAsBuyer => "FeedbackReceivedAsBuyer",
        }
    }
}

/// Parameters of one `GetFeedback` page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetFeedbackRequest {
    pub detail_level: String,
    pub feedback_type: FeedbackType,
    pub entries_per_page: u32,
    pub page_number: u32,
}

impl GetFeedbackRequest {
    /// A full-detail request for one page of the listing.
    pub fn page(feedback_type: FeedbackType, entries_per_page: u32, page_number: u32) -> Self {
        Self {
            detail_level: "ReturnAll".to_string(),
            feedback_type,
            entries_per_page,
            page_number,
        }
    }
}

/// Decoded `GetFeedbackResponse` envelope. Every field is optional: the
/// API omits whole sections freely and a missing one must never abort a
/// fetch that is otherwise succeeding.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct GetFeedbackResponse {
    #[serde(rename = "Ack")]
    pub ack: Option<String>,
    #[serde(rename = "Errors", default)]
    pub errors: Vec<ResponseError>,
    #[serde(rename = "FeedbackDetailArray")]
    pub feedback_detail_array: Option<FeedbackDetailArray>,
    #[serde(rename = "PaginationResult")]
    pub pagination_result: Option<PaginationResult>,
}

impl GetFeedbackResponse {
    pub fn is_failure(&self) -> bool {
        matches!(self.ack.as_deref(), Some("Failure"))
    }

    /// Code and message of the first reported error, empty strings if the
    /// response carried none.
    pub fn first_error(&self) -> (String, String) {
        self.errors
            .first()
            .map(|e| {
                let message = e
                    .long_message
                    .clone()
                    .or_else(|| e.short_message.clone())
                    .unwrap_or_default();
                (e.error_code.clone().unwrap_or_default(), message)
            })
            .unwrap_or_default()
    }

    /// The detail list, flattened. A response whose `FeedbackDetail` held a
    /// single element decodes to a one-element slice here.
    pub fn details(&self) -> &[FeedbackDetail] {
        self.feedback_detail_array
            .as_ref()
            .map(|a| a.feedback_detail.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.pagination_result
            .as_ref()
            .and_then(|p| p.total_number_of_pages)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FeedbackDetailArray {
    #[serde(rename = "FeedbackDetail", default)]
    pub feedback_detail: Vec<FeedbackDetail>,
}

/// One feedback record as it appears on the wire.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FeedbackDetail {
    #[serde(rename = "CommentText")]
    pub comment_text: Option<String>,
    #[serde(rename = "CommentType")]
    pub comment_type: Option<String>,
    #[serde(rename = "CommentTime")]
    pub comment_time: Option<String>,
    #[serde(rename = "Role")]
    pub role: Option<String>,
    #[serde(rename = "ItemID")]
    pub item_id: Option<String>,
    #[serde(rename = "ItemTitle")]
    pub item_title: Option<String>,
    #[serde(rename = "CommentingUser")]
    pub commenting_user: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PaginationResult {
    #[serde(rename = "TotalNumberOfPages")]
    pub total_number_of_pages: Option<u32>,
    #[serde(rename = "TotalNumberOfEntries")]
    pub total_number_of_entries: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ResponseError {
    #[serde(rename = "ShortMessage")]
    pub short_message: Option<String>,
    #[serde(rename = "LongMessage")]
    pub long_message: Option<String>,
    #[serde(rename = "ErrorCode")]
    pub error_code: Option<String>,
    #[serde(rename = "SeverityCode")]
    pub severity_code: Option<String>,
}
