//! Registration repository implementation
//!
//! The partial unique index on (user_id, event_id) over non-cancelled rows
//! backs the at-most-one-active-registration invariant at the storage level;
//! a violation is surfaced as `AlreadyRegistered`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::database::store::RegistrationStore;
use crate::models::{EmergencyContact, NewRegistration, Registration, RegistrationStatus};
use crate::utils::errors::{Result, SkPortalError};

const ACTIVE_UNIQUE_CONSTRAINT: &str = "uniq_active_registration";

const REGISTRATION_COLUMNS: &str = "id, event_id, user_id, status, registration_date, emergency_contact_name, emergency_contact_phone, emergency_contact_relationship, special_requirements, notes, attendance_marked, attendance_time";

#[derive(Debug, FromRow)]
struct RegistrationRow {
    id: i64,
    event_id: i64,
    user_id: i64,
    status: String,
    registration_date: DateTime<Utc>,
    emergency_contact_name: String,
    emergency_contact_phone: String,
    emergency_contact_relationship: String,
    special_requirements: Option<String>,
    notes: Option<String>,
    attendance_marked: bool,
    attendance_time: Option<DateTime<Utc>>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = SkPortalError;

    fn try_from(row: RegistrationRow) -> Result<Self> {
        let status = RegistrationStatus::parse(&row.status).ok_or_else(|| {
            SkPortalError::InvalidInput(format!("unknown registration status: {}", row.status))
        })?;

        Ok(Registration {
            id: row.id,
            event_id: row.event_id,
            user_id: row.user_id,
            status,
            registration_date: row.registration_date,
            emergency_contact: EmergencyContact {
                name: row.emergency_contact_name,
                phone: row.emergency_contact_phone,
                relationship: row.emergency_contact_relationship,
            },
            special_requirements: row.special_requirements,
            notes: row.notes,
            attendance_marked: row.attendance_marked,
            attendance_time: row.attendance_time,
        })
    }
}

#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationStore for RegistrationRepository {
    async fn find_by_id(&self, registration_id: i64) -> Result<Option<Registration>> {
        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"
        ))
        .bind(registration_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Registration::try_from).transpose()
    }

    async fn find_active_by_user_and_event(
        &self,
        user_id: i64,
        event_id: i64,
    ) -> Result<Option<Registration>> {
        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE user_id = $1 AND event_id = $2 AND status <> 'cancelled' LIMIT 1"
        ))
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Registration::try_from).transpose()
    }

    async fn create(&self, registration: NewRegistration) -> Result<Registration> {
        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            r#"
            INSERT INTO registrations (event_id, user_id, status, registration_date, emergency_contact_name, emergency_contact_phone, emergency_contact_relationship, special_requirements, notes, attendance_marked)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(registration.event_id)
        .bind(registration.user_id)
        .bind(registration.status.as_str())
        .bind(registration.registration_date)
        .bind(&registration.emergency_contact.name)
        .bind(&registration.emergency_contact.phone)
        .bind(&registration.emergency_contact.relationship)
        .bind(&registration.special_requirements)
        .bind(&registration.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some(ACTIVE_UNIQUE_CONSTRAINT) => {
                SkPortalError::AlreadyRegistered {
                    user_id: registration.user_id,
                    event_id: registration.event_id,
                }
            }
            _ => SkPortalError::Database(e),
        })?;

        Registration::try_from(row)
    }

    async fn update_status(
        &self,
        registration_id: i64,
        new_status: RegistrationStatus,
        attendance_time: Option<DateTime<Utc>>,
    ) -> Result<Registration> {
        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            r#"
            UPDATE registrations
            SET status = $2,
                attendance_marked = CASE WHEN $3::timestamptz IS NOT NULL THEN TRUE ELSE attendance_marked END,
                attendance_time = COALESCE($3, attendance_time)
            WHERE id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(registration_id)
        .bind(new_status.as_str())
        .bind(attendance_time)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(SkPortalError::RegistrationNotFound { registration_id })?;

        Registration::try_from(row)
    }

    async fn list_by_event(&self, event_id: i64) -> Result<Vec<Registration>> {
        let rows = sqlx::query_as::<_, RegistrationRow>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 ORDER BY registration_date ASC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Registration::try_from).collect()
    }

    async fn count_counted_by_event(&self, event_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status IN ('pending', 'confirmed', 'attended')"
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }
}
