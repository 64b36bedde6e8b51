pub mod search;
pub mod trending;

pub use search::*;
pub use trending::*;

use crate::models::ErrorResponse;
use rocket::http::Status;
use rocket::{catch, Request};

#[catch(404)]
pub fn not_found(request: &Request<'_>) -> ErrorResponse {
    ErrorResponse::new(
        Status::NotFound,
        format!("{} 경로를 찾을 수 없습니다.", request.uri().path()),
    )
}

#[catch(default)]
pub fn default_catcher(status: Status, _request: &Request<'_>) -> ErrorResponse {
    ErrorResponse::new(status, status.reason().unwrap_or("Unknown error"))
}
