use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::Serialize;
use rocket::{response, Response};
use std::io::Cursor;

/// Shown instead of a subscriber count the channel owner has hidden.
pub const HIDDEN_SENTINEL: &str = "비공개";
/// Shown for channel fields when the channel lookup did not return the channel.
pub const UNKNOWN_SENTINEL: &str = "정보 없음";

pub const MISSING_SEARCH_PARAMS_MESSAGE: &str = "검색어와 기간이 필요합니다.";
pub const INVALID_PERIOD_MESSAGE: &str = "기간은 1 이상의 정수여야 합니다.";
pub const SEARCH_FAILED_MESSAGE: &str = "API 요청 중 오류가 발생했습니다.";
pub const CATEGORY_SEARCH_FAILED_MESSAGE: &str = "동영상을 가져올 수 없습니다.";

pub fn trending_failed_message(region: &str) -> String {
    format!("{region} 국가의 트렌드 데이터를 가져올 수 없습니다. 잠시 후 다시 시도해주세요.")
}

/// One search result, joined with its video details and channel details.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail: String,
    pub view_count: String,
    pub subscriber_count: String,
    pub channel_published_at: String,
    pub is_short: bool,
}

/// Reduced record for trending lists: no channel join, no short-form flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct TrendingVideo {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail: String,
    pub view_count: String,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip)]
    pub status: Status,
}

impl ErrorResponse {
    pub fn new(status: Status, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status,
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(Status::BadRequest, error)
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(Status::InternalServerError, error)
    }
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = serde_json::to_string(&self).map_err(|_| Status::InternalServerError)?;
        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
