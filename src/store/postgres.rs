//! Postgres-backed store via SQLx.
//!
//! Owns the `creator_trophies` table. Creator stats are read from the
//! host application's `species`, `extinctions` and `species_zones`
//! tables, which must already exist.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{TrophyStore, require_id};
use crate::error::Result;
use crate::model::{Creator, CreatorStats, Unlock};
use crate::trophy::Trophy;

/// Production store. Owns the connection pool.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to Postgres and create a connection pool.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Create the unlock table if it is missing. Idempotent.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS creator_trophies (
                creator_id      BIGINT NOT NULL,
                creator_name    TEXT NOT NULL,
                trophy_id       TEXT NOT NULL,
                unlocked_at     TIMESTAMPTZ NOT NULL,
                times_unlocked  INTEGER NOT NULL DEFAULT 1,
                PRIMARY KEY (creator_id, trophy_id)
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Simple health check — run a SELECT 1.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TrophyStore for PgStore {
    async fn unlocked(&self, creator: &Creator, trophies: &[Trophy]) -> Result<HashSet<String>> {
        let id = require_id(creator)?;
        let ids: Vec<String> = trophies.iter().map(|t| t.id().to_string()).collect();

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT trophy_id FROM creator_trophies
             WHERE creator_id = $1 AND trophy_id = ANY($2)",
        )
        .bind(id.0 as i64)
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(tid,)| tid).collect())
    }

    async fn stats(&self, creator: &Creator) -> Result<CreatorStats> {
        let id = require_id(creator)?;

        let species: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM species WHERE owner_id = $1")
            .bind(id.0 as i64)
            .fetch_one(&self.pool)
            .await?;

        let extinct: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM species s
             JOIN extinctions x ON x.species_id = s.id
             WHERE s.owner_id = $1",
        )
        .bind(id.0 as i64)
        .fetch_one(&self.pool)
        .await?;

        let zones: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT sz.zone_id) FROM species s
             JOIN species_zones sz ON sz.species_id = s.id
             WHERE s.owner_id = $1",
        )
        .bind(id.0 as i64)
        .fetch_one(&self.pool)
        .await?;

        Ok(CreatorStats {
            species_count: species.max(0) as u64,
            extinct_species_count: extinct.max(0) as u64,
            zones_inhabited: zones.max(0) as u64,
        })
    }

    async fn persist_unlock(&self, creator: &Creator, trophy: &Trophy) -> Result<Unlock> {
        let id = require_id(creator)?;
        let now = Utc::now();

        // Duplicate persists are last-write-wins: the conflict arm bumps
        // the counter instead of failing.
        let (unlocked_at, times_unlocked): (DateTime<Utc>, i32) = sqlx::query_as(
            "INSERT INTO creator_trophies
                 (creator_id, creator_name, trophy_id, unlocked_at, times_unlocked)
             VALUES ($1, $2, $3, $4, 1)
             ON CONFLICT (creator_id, trophy_id) DO UPDATE
                 SET unlocked_at = EXCLUDED.unlocked_at,
                     times_unlocked = creator_trophies.times_unlocked + 1
             RETURNING unlocked_at, times_unlocked",
        )
        .bind(id.0 as i64)
        .bind(&creator.name)
        .bind(trophy.id())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(Unlock {
            creator_id: id,
            trophy_id: trophy.id().to_string(),
            unlocked_at,
            times_unlocked: times_unlocked.max(0) as u32,
        })
    }
}
