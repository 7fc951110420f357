use async_trait::async_trait;

use super::{delete_by_id, PgStore};
use crate::error::Result;
use crate::models::user::{Role, User};
use crate::repositories::UserRepository;

const COLUMNS: &str = "id, email, password_hash, role, created_at";

#[async_trait]
impl UserRepository for PgStore {
    async fn create_user(&self, email: &str, password_hash: &str, role: Role) -> Result<User> {
        let query = format!(
            "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(password_hash)
            .bind(role)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE email = $1", COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        delete_by_id(&self.pool, "users", id).await
    }
}
