//! Profile repository
//!
//! Single-row-per-user reads and upserts over the `profiles` table. A
//! missing row is an `Ok(None)`, never an error; callers substitute a
//! default profile built from the session.

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::profile::Profile;

/// Profile repository
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a user's profile, if one has been saved
    pub async fn fetch(&self, user_id: Uuid) -> DatabaseResult<Option<Profile>> {
        let row = sqlx::query(
            r#"
            SELECT id, full_name, username, gender, email, phone, avatar_url
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        match row {
            Some(row) => {
                let profile = Profile {
                    id: row.get("id"),
                    full_name: row.get("full_name"),
                    username: row.get("username"),
                    gender: row.get("gender"),
                    email: row.get("email"),
                    phone: row.get("phone"),
                    avatar_url: row.get("avatar_url"),
                };
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    /// Upsert a user's profile
    ///
    /// Insert if absent, full replacement of every mutable field if
    /// present; there is no partial-field merge.
    pub async fn save(&self, profile: &Profile) -> DatabaseResult<Profile> {
        let row = sqlx::query(
            r#"
            INSERT INTO profiles (id, full_name, username, gender, email, phone, avatar_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                username = EXCLUDED.username,
                gender = EXCLUDED.gender,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = NOW()
            RETURNING id, full_name, username, gender, email, phone, avatar_url
            "#,
        )
        .bind(profile.id)
        .bind(&profile.full_name)
        .bind(&profile.username)
        .bind(&profile.gender)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.avatar_url)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        let saved = Profile {
            id: row.get("id"),
            full_name: row.get("full_name"),
            username: row.get("username"),
            gender: row.get("gender"),
            email: row.get("email"),
            phone: row.get("phone"),
            avatar_url: row.get("avatar_url"),
        };

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use common::database::{DatabaseConfig, init_pool};
    use serial_test::serial;

    async fn pool() -> Result<PgPool> {
        let config = DatabaseConfig::from_env()?;
        Ok(init_pool(&config).await?)
    }

    async fn seed_user(pool: &PgPool) -> Result<Uuid> {
        let id = sqlx::query_scalar(
            "INSERT INTO users (email, password_hash) VALUES ($1, 'test-hash') RETURNING id",
        )
        .bind(format!("{}@example.com", Uuid::new_v4()))
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    // Cascades to the user's profile row
    async fn remove_user(pool: &PgPool, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn save_then_fetch_round_trip() -> Result<()> {
        let pool = pool().await?;
        let user_id = seed_user(&pool).await?;
        let repository = ProfileRepository::new(pool.clone());

        let profile = Profile {
            id: user_id,
            full_name: Some("Asha Verma".to_string()),
            username: Some("asha".to_string()),
            gender: None,
            email: Some("asha@example.com".to_string()),
            phone: Some("+91 98765 43210".to_string()),
            avatar_url: None,
        };

        let saved = repository.save(&profile).await?;
        assert_eq!(saved, profile);

        let fetched = repository.fetch(user_id).await?;
        assert_eq!(fetched, Some(profile));

        remove_user(&pool, user_id).await?;
        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn second_save_replaces_every_field() -> Result<()> {
        let pool = pool().await?;
        let user_id = seed_user(&pool).await?;
        let repository = ProfileRepository::new(pool.clone());

        let first = Profile {
            id: user_id,
            full_name: Some("Asha Verma".to_string()),
            username: Some("asha".to_string()),
            gender: Some("female".to_string()),
            email: Some("asha@example.com".to_string()),
            phone: Some("+91 98765 43210".to_string()),
            avatar_url: Some("https://avatars.example.com/a.png".to_string()),
        };
        repository.save(&first).await?;

        let second = Profile {
            id: user_id,
            full_name: Some("Asha V.".to_string()),
            username: None,
            gender: None,
            email: None,
            phone: None,
            avatar_url: None,
        };
        repository.save(&second).await?;

        // Full replacement: fields absent from the second save are cleared
        assert_eq!(repository.fetch(user_id).await?, Some(second));

        remove_user(&pool, user_id).await?;
        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn missing_profile_reads_as_none() -> Result<()> {
        let pool = pool().await?;
        let user_id = seed_user(&pool).await?;
        let repository = ProfileRepository::new(pool.clone());

        assert_eq!(repository.fetch(user_id).await?, None);

        remove_user(&pool, user_id).await?;
        Ok(())
    }
}
