use crate::error::{TrendingError, TrendingPath};
use crate::models::{
    trending_failed_message, ErrorResponse, TrendingVideo, CATEGORY_SEARCH_FAILED_MESSAGE,
};
use crate::AppState;
use log::error;
use rocket::serde::json::Json;
use rocket::{get, State};

const DEFAULT_REGION: &str = "US";
const DEFAULT_CATEGORY: &str = "all";

#[get("/trending-keywords?<geo>&<category>")]
pub async fn trending_videos(
    geo: Option<String>,
    category: Option<String>,
    state: &State<AppState>,
) -> Result<Json<Vec<TrendingVideo>>, ErrorResponse> {
    let geo = geo.unwrap_or_else(|| DEFAULT_REGION.to_string());
    let category = category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    match state.trending.trending(&geo, &category).await {
        Ok(videos) => Ok(Json(videos)),
        Err(TrendingError { path, source }) => {
            error!("YouTube Trending Error for {geo} ({category}): {source}");
            let message = match path {
                TrendingPath::Chart => trending_failed_message(&geo),
                TrendingPath::Search => CATEGORY_SEARCH_FAILED_MESSAGE.to_string(),
            };
            Err(ErrorResponse::internal(message))
        }
    }
}
