use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::evaluation::Evaluation;

/// Badge Issuer: told about passing evaluations so it can award skill badges.
/// Delivery is best-effort; callers log and drop errors.
#[async_trait]
pub trait BadgeIssuer: Send + Sync {
    async fn notify_passed(&self, candidate_id: Uuid, evaluation: &Evaluation) -> Result<(), AppError>;
}

/// One-way message published for the badge service.
#[derive(Debug, Serialize)]
pub struct PassedMessage<'a> {
    pub candidate_id: Uuid,
    pub evaluation_id: i64,
    pub application_id: Option<i64>,
    pub ats_score: f64,
    pub matched_skills: &'a [String],
}

impl<'a> PassedMessage<'a> {
    pub fn new(candidate_id: Uuid, evaluation: &'a Evaluation) -> Self {
        Self {
            candidate_id,
            evaluation_id: evaluation.id,
            application_id: evaluation.application_id,
            ats_score: evaluation.ats_score,
            matched_skills: &evaluation.matched_skills,
        }
    }
}

/// Publishes `PassedMessage` JSON on a Redis pub/sub channel. No reply is expected.
pub struct RedisBadgeIssuer {
    client: RedisClient,
    channel: String,
}

impl RedisBadgeIssuer {
    pub fn new(client: RedisClient, channel: impl Into<String>) -> Self {
        Self {
            client,
            channel: channel.into(),
        }
    }
}

#[async_trait]
impl BadgeIssuer for RedisBadgeIssuer {
    async fn notify_passed(&self, candidate_id: Uuid, evaluation: &Evaluation) -> Result<(), AppError> {
        let payload = serde_json::to_string(&PassedMessage::new(candidate_id, evaluation))
            .map_err(|e| AppError::Notification(format!("badge message encoding failed: {e}")))?;

        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Notification(format!("redis connection failed: {e}")))?;

        let receivers: i64 = conn
            .publish(&self.channel, payload)
            .await
            .map_err(|e| AppError::Notification(format!("redis publish failed: {e}")))?;

        debug!(
            "Published passed evaluation {} to '{}' ({receivers} subscribers)",
            evaluation.id, self.channel
        );
        Ok(())
    }
}
