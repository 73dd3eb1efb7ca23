#![feature(int_roundings)]

mod entity;
mod error;
mod handlers;
mod prelude;
mod state;
mod sv;
mod utils;

use std::{env, net::SocketAddr};

use axum::{
  Router,
  routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};
use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{prelude::*, state::AppState};

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "affiliate=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let db_url = env::var("DATABASE_URL")
    .unwrap_or_else(|_| "sqlite:affiliate.db?mode=rwc".into());
  let base_url =
    env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".into());

  info!("Starting affiliate server v{}", env!("CARGO_PKG_VERSION"));

  let app_state = Arc::new(AppState::new(&db_url, &base_url).await);

  let governor_conf = Arc::new(
    GovernorConfigBuilder::default()
      .per_second(2)
      .burst_size(100)
      .finish()
      .expect("Failed to build rate limiter config"),
  );

  let governor_limiter = governor_conf.limiter().clone();
  tokio::spawn(async move {
    loop {
      tokio::time::sleep(Duration::from_secs(60)).await;
      governor_limiter.retain_recent();
    }
  });

  let app = Router::new()
    .route("/health", get(handlers::health))
    .route("/promo/{code}", get(handlers::track_click))
    .route("/api/promotions", post(handlers::create_promotion))
    .route("/api/promotions/{id}/clicks", post(handlers::record_click))
    .route(
      "/api/promotions/stats/{year}/{month}",
      get(handlers::promotion_stats),
    )
    .route("/api/products/track-view", post(handlers::track_view))
    .route("/api/products/stats/{year}/{month}", get(handlers::product_stats))
    .route("/api/earnings/{id}/status", patch(handlers::update_earnings_status))
    .route("/api/earnings/stats", get(handlers::earnings_stats))
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(governor_conf))
        .layer(
          CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        ),
    )
    .with_state(app_state);

  let port: u16 =
    env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  info!("HTTP server listening on {}", addr);

  let listener =
    tokio::net::TcpListener::bind(addr).await.expect("Failed to bind");
  axum::serve(
    listener,
    app.into_make_service_with_connect_info::<SocketAddr>(),
  )
  .await
  .expect("Server error");
}
