use crate::error::AggregationError;
use crate::models::{
    ErrorResponse, VideoSummary, INVALID_PERIOD_MESSAGE, MISSING_SEARCH_PARAMS_MESSAGE,
    SEARCH_FAILED_MESSAGE,
};
use crate::AppState;
use log::{error, warn};
use rocket::serde::json::Json;
use rocket::{get, State};

#[get("/search?<keyword>&<period>")]
pub async fn search_videos(
    keyword: Option<String>,
    period: Option<String>,
    state: &State<AppState>,
) -> Result<Json<Vec<VideoSummary>>, ErrorResponse> {
    let (keyword, period) = match (keyword, period) {
        (Some(keyword), Some(period)) if !keyword.is_empty() && !period.is_empty() => {
            (keyword, period)
        }
        _ => return Err(ErrorResponse::bad_request(MISSING_SEARCH_PARAMS_MESSAGE)),
    };

    let period_days = match period.trim().parse::<u32>() {
        Ok(days) if days > 0 => days,
        _ => {
            warn!("Rejected search period '{period}'");
            return Err(ErrorResponse::bad_request(INVALID_PERIOD_MESSAGE));
        }
    };

    match state
        .aggregator
        .search(&keyword, period_days, chrono::Utc::now())
        .await
    {
        Ok(videos) => Ok(Json(videos)),
        Err(AggregationError::PeriodOutOfRange(days)) => {
            warn!("Search period of {days} days is out of range");
            Err(ErrorResponse::bad_request(INVALID_PERIOD_MESSAGE))
        }
        Err(AggregationError::Upstream(e)) => {
            error!("YouTube API Error: {e}");
            Err(ErrorResponse::internal(SEARCH_FAILED_MESSAGE))
        }
    }
}
