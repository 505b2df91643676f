mod ats;
mod config;
mod db;
mod errors;
mod evaluation;
mod models;
mod routes;
mod state;
mod stores;
#[cfg(test)]
mod testing;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;
use std::time::Duration;

use crate::ats::matcher::{ExactSubstringMatcher, SkillMatcher};
use crate::config::Config;
use crate::db::create_pool;
use crate::evaluation::service::{BatchLimits, Evaluator};
use crate::routes::build_router;
use crate::state::AppState;
use crate::stores::badges::RedisBadgeIssuer;
use crate::stores::evaluations::{EvaluationStore, PgEvaluationStore};
use crate::stores::resumes::S3ResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS scoring API v{}", env!("CARGO_PKG_VERSION"));

    // Evaluation Store (PostgreSQL)
    let db = create_pool(&config.database_url).await?;
    let evaluations: Arc<dyn EvaluationStore> = Arc::new(PgEvaluationStore::new(db));

    // Badge Issuer (Redis pub/sub)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let badges = Arc::new(RedisBadgeIssuer::new(redis, config.badge_channel.clone()));
    info!("Badge notifications publish to '{}'", config.badge_channel);

    // Résumé Store (S3 / MinIO)
    let s3 = build_s3_client(&config).await;
    let resumes = Arc::new(S3ResumeStore::new(
        s3,
        config.s3_bucket.clone(),
        config.resume_key_prefix.clone(),
    ));
    info!("S3 client initialized");

    let matcher: Arc<dyn SkillMatcher> = Arc::new(ExactSubstringMatcher);
    info!("Skill matcher: {}", matcher.name());

    let evaluator = Evaluator::new(resumes, evaluations.clone(), badges, matcher)
        .with_limits(BatchLimits {
            concurrency: config.batch_concurrency,
            max_items: config.max_batch_size,
        })
        .with_notify_timeout(Duration::from_millis(config.badge_timeout_ms));

    let state = AppState {
        evaluator,
        evaluations,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "ats-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
