//! Event repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::database::store::EventStore;
use crate::models::{Event, EventStatus};
use crate::utils::errors::{Result, SkPortalError};

#[derive(Debug, FromRow)]
struct EventRow {
    id: i64,
    title: String,
    description: Option<String>,
    barangay: String,
    municipality: Option<String>,
    province: Option<String>,
    max_participants: Option<i32>,
    current_participants: i32,
    registration_deadline: Option<DateTime<Utc>>,
    is_registration_open: bool,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = SkPortalError;

    fn try_from(row: EventRow) -> Result<Self> {
        let status = EventStatus::parse(&row.status).ok_or_else(|| {
            SkPortalError::InvalidInput(format!("unknown event status: {}", row.status))
        })?;

        Ok(Event {
            id: row.id,
            title: row.title,
            description: row.description,
            barangay: row.barangay,
            municipality: row.municipality,
            province: row.province,
            max_participants: row.max_participants,
            current_participants: row.current_participants,
            registration_deadline: row.registration_deadline,
            is_registration_open: row.is_registration_open,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            "SELECT id, title, description, barangay, municipality, province, max_participants, current_participants, registration_deadline, is_registration_open, status, created_at, updated_at FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Event::try_from).transpose()
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn get_by_id(&self, event_id: i64) -> Result<Option<Event>> {
        self.find_by_id(event_id).await
    }

    async fn atomic_increment_participants(&self, event_id: i64, delta: i32) -> Result<()> {
        // Single conditional UPDATE so the counter is never read-modify-written
        // across two statements. The guard keeps the count from going negative.
        let result = sqlx::query(
            r#"
            UPDATE events
            SET current_participants = current_participants + $2,
                updated_at = $3
            WHERE id = $1 AND current_participants + $2 >= 0
            "#,
        )
        .bind(event_id)
        .bind(delta)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Callers have already resolved the event, so a missed update
            // means the conditional guard did not hold
            return Err(SkPortalError::Conflict { event_id });
        }

        Ok(())
    }
}
