use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use thiserror::Error;

use crate::models::{InteractionMetadata, InteractionType, NetworkingInteraction, UserProfile};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),
}

const PROFILE_COLUMNS: &str =
    "user_id, company, role, industry, location, linkedin, bio, interests, looking_for, offering";

/// PostgreSQL client backing the profile and interaction history stores
///
/// Constructed once at startup and shared through `AppState`.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Fetch a single profile by user ID
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, PostgresError> {
        let query = format!("SELECT {} FROM user_profiles WHERE user_id = $1", PROFILE_COLUMNS);

        sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Profile not found for user {}", user_id)))
    }

    /// Fetch every profile except the given user's
    pub async fn list_other_profiles(&self, user_id: &str) -> Result<Vec<UserProfile>, PostgresError> {
        self.list_candidates(user_id, None, None).await
    }

    /// Fetch candidate profiles, optionally narrowed by industry and location
    ///
    /// Rows come back in `user_id` order so that ties rank deterministically.
    pub async fn list_candidates(
        &self,
        user_id: &str,
        industry: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<UserProfile>, PostgresError> {
        let query = format!(
            r#"
            SELECT {}
            FROM user_profiles
            WHERE user_id <> $1
              AND ($2::TEXT IS NULL OR industry = $2)
              AND ($3::TEXT IS NULL OR location = $3)
            ORDER BY user_id
            "#,
            PROFILE_COLUMNS
        );

        let profiles = sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_id)
            .bind(industry)
            .bind(location)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Loaded {} candidate profiles for {}", profiles.len(), user_id);

        Ok(profiles)
    }

    /// Get every user the given user has already interacted with
    pub async fn get_interacted_ids(&self, user_id: &str) -> Result<HashSet<String>, PostgresError> {
        let query = r#"
            SELECT DISTINCT to_user_id
            FROM networking_interactions
            WHERE from_user_id = $1
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let ids: HashSet<String> = rows
            .iter()
            .map(|row| row.get("to_user_id"))
            .collect();

        tracing::debug!("User {} has interacted with {} users", user_id, ids.len());

        Ok(ids)
    }

    /// Insert an interaction row
    pub async fn record_interaction(
        &self,
        interaction: &NetworkingInteraction,
    ) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO networking_interactions (id, from_user_id, to_user_id, type, timestamp, metadata)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        sqlx::query(query)
            .bind(interaction.id)
            .bind(&interaction.from_user_id)
            .bind(&interaction.to_user_id)
            .bind(interaction.interaction_type)
            .bind(interaction.timestamp)
            .bind(interaction.metadata.as_ref().map(Json))
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded interaction: {} -> {} ({:?})",
            interaction.from_user_id,
            interaction.to_user_id,
            interaction.interaction_type
        );

        Ok(())
    }

    /// Store the boost earned by a pair through their latest interaction
    ///
    /// Uses INSERT ... ON CONFLICT so each ordered pair keeps a single row.
    pub async fn upsert_score_boost(
        &self,
        user_id_1: &str,
        user_id_2: &str,
        interaction_type: InteractionType,
    ) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO match_scores (user_id_1, user_id_2, score_boost, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id_1, user_id_2)
            DO UPDATE SET
                score_boost = EXCLUDED.score_boost,
                updated_at = EXCLUDED.updated_at
        "#;

        sqlx::query(query)
            .bind(user_id_1)
            .bind(user_id_2)
            .bind(interaction_type.score_boost())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Interaction history of a user, newest first, with the target profile attached
    pub async fn get_interaction_history(
        &self,
        user_id: &str,
    ) -> Result<Vec<NetworkingInteraction>, PostgresError> {
        let query = r#"
            SELECT id, from_user_id, to_user_id, type, timestamp, metadata
            FROM networking_interactions
            WHERE from_user_id = $1
            ORDER BY timestamp DESC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let mut interactions = rows
            .iter()
            .map(|row| {
                let metadata: Option<Json<InteractionMetadata>> = row.try_get("metadata")?;
                Ok(NetworkingInteraction {
                    id: row.try_get("id")?,
                    from_user_id: row.try_get("from_user_id")?,
                    to_user_id: row.try_get("to_user_id")?,
                    interaction_type: row.try_get("type")?,
                    timestamp: row.try_get("timestamp")?,
                    metadata: metadata.map(|Json(m)| m),
                    to_user: None,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        let target_ids: Vec<String> = interactions
            .iter()
            .map(|i| i.to_user_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let profiles = self.get_profiles(&target_ids).await?;
        for interaction in &mut interactions {
            interaction.to_user = profiles.get(&interaction.to_user_id).cloned();
        }

        Ok(interactions)
    }

    async fn get_profiles(&self, user_ids: &[String]) -> Result<HashMap<String, UserProfile>, PostgresError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let query = format!("SELECT {} FROM user_profiles WHERE user_id = ANY($1)", PROFILE_COLUMNS);

        let profiles = sqlx::query_as::<_, UserProfile>(&query)
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(profiles.into_iter().map(|p| (p.user_id.clone(), p)).collect())
    }

    /// Users the given user has sent a connection to
    pub async fn get_connection_ids(&self, user_id: &str) -> Result<Vec<String>, PostgresError> {
        let query = r#"
            SELECT to_user_id
            FROM networking_interactions
            WHERE from_user_id = $1 AND type = 'connection'
            ORDER BY timestamp
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(|row| row.get("to_user_id")).collect())
    }

    /// Type and timestamp of every interaction sent by the user
    pub async fn get_interaction_timeline(
        &self,
        user_id: &str,
    ) -> Result<Vec<(InteractionType, DateTime<Utc>)>, PostgresError> {
        let query = r#"
            SELECT type, timestamp
            FROM networking_interactions
            WHERE from_user_id = $1
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let timeline = rows
            .iter()
            .map(|row| {
                let interaction_type: InteractionType = row.try_get("type")?;
                let timestamp: DateTime<Utc> = row.try_get("timestamp")?;
                Ok((interaction_type, timestamp))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(timeline)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
