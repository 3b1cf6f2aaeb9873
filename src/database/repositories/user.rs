//! User repository implementation
//!
//! Users are owned by the identity subsystem; this repository only reads the
//! fields the registration core needs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::database::store::UserStore;
use crate::models::{User, UserRole};
use crate::utils::errors::{Result, SkPortalError};

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    role: String,
    barangay: Option<String>,
    municipality: Option<String>,
    province: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = SkPortalError;

    fn try_from(row: UserRow) -> Result<Self> {
        let role = UserRole::parse(&row.role)
            .ok_or_else(|| SkPortalError::InvalidInput(format!("unknown user role: {}", row.role)))?;

        Ok(User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            role,
            barangay: row.barangay,
            municipality: row.municipality,
            province: row.province,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, first_name, last_name, email, role, barangay, municipality, province, is_active, created_at, updated_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn get_by_id(&self, user_id: i64) -> Result<Option<User>> {
        self.find_by_id(user_id).await
    }
}
