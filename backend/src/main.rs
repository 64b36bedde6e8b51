#[macro_use]
extern crate rocket;

mod api;
mod categories;
mod config;
mod error;
mod models;
mod services;
mod utils;

use crate::services::search_service::VideoAggregator;
use crate::services::trending_service::TrendingService;
use crate::services::youtube_service::VideoPlatform;
use rocket::{Build, Rocket};
use std::sync::Arc;

pub struct AppState {
    pub aggregator: VideoAggregator,
    pub trending: TrendingService,
}

impl AppState {
    pub fn new(platform: Arc<dyn VideoPlatform>, search_region: &str) -> Self {
        Self {
            aggregator: VideoAggregator::new(platform.clone(), search_region),
            trending: TrendingService::new(platform),
        }
    }
}

pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount("/api", routes![api::search_videos, api::trending_videos])
        .register("/", catchers![api::not_found, api::default_catcher])
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    config::load_environment();
    config::init_logger();

    let config = config::Config::from_env()?;
    let state = config::create_app_state(&config)?;
    let cors = config::create_cors(&config)?;

    build_rocket(state)
        .attach(cors)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed to launch: {}", e))?;

    Ok(())
}
