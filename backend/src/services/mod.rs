pub mod search_service;
pub mod trending_service;
pub mod youtube_service;

#[cfg(test)]
pub mod fake_platform;
