use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::event::{CreateEventRequest, EventDetailResponse, EventResponse, UpdateEventRequest};
use crate::error::{Result, StorageError};
use crate::models::{Event, Fight, Fighter};

const EVENT_COLUMNS: &str = "event_id, name, location, venue, date, created_at, updated_at";

/// Repository for Event database operations
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all events, most recent first
    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY date DESC, created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    /// Events taking place today or later, soonest first
    pub async fn list_upcoming(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE date >= CURRENT_DATE ORDER BY date ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE event_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Event with its fights and participating fighters
    pub async fn find_detailed(&self, id: Uuid) -> Result<EventDetailResponse> {
        let event = self.find_by_id(id).await?;

        let fights = sqlx::query_as::<_, Fight>(
            r#"
            SELECT fight_id, event_id, winner_id, loser_id, last_round,
                   referee, win_condition, created_at, updated_at
            FROM fights
            WHERE event_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let fighters = sqlx::query_as::<_, Fighter>(
            r#"
            SELECT f.fighter_id, f.name, f.wins, f.losses, f.knockouts, f.submissions,
                   f.weight_class, f.nationality, f.team, f.nickname, f.date_of_birth,
                   f.last_weight_grams, f.height_cm, f.image_path, f.created_at, f.updated_at
            FROM event_fighters ef
            JOIN fighters f ON ef.fighter_id = f.fighter_id
            WHERE ef.event_id = $1
            ORDER BY f.name
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(EventDetailResponse {
            event: EventResponse::from(event),
            fights,
            fighters,
        })
    }

    /// Create an event and attach its fighters and fights in one transaction
    pub async fn create(&self, req: &CreateEventRequest) -> Result<Event> {
        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (name, location, venue, date)
            VALUES ($1, $2, $3, $4)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(&req.location)
        .bind(&req.venue)
        .bind(req.date)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(fighter_ids) = &req.fighter_ids {
            replace_fighters(&mut tx, event.event_id, fighter_ids).await?;
        }

        if let Some(fight_ids) = &req.fight_ids {
            attach_fights(&mut tx, event.event_id, fight_ids).await?;
        }

        tx.commit().await?;

        Ok(event)
    }

    /// Update an event; `fighter_ids` replaces the participants, `fight_ids` moves fights onto the card
    pub async fn update(&self, id: Uuid, existing: &Event, req: &UpdateEventRequest) -> Result<Event> {
        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET name = $2,
                location = $3,
                venue = $4,
                date = $5,
                updated_at = NOW()
            WHERE event_id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.name.as_ref().unwrap_or(&existing.name))
        .bind(req.location.as_ref().unwrap_or(&existing.location))
        .bind(req.venue.as_ref().unwrap_or(&existing.venue))
        .bind(req.date.unwrap_or(existing.date))
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        if let Some(fighter_ids) = &req.fighter_ids {
            replace_fighters(&mut tx, id, fighter_ids).await?;
        }

        if let Some(fight_ids) = &req.fight_ids {
            attach_fights(&mut tx, id, fight_ids).await?;
        }

        tx.commit().await?;

        Ok(event)
    }

    /// Delete an event by ID. Events with recorded fights cannot be deleted.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e).into_constraint_violation("Event still has recorded fights")
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

async fn replace_fighters(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
    fighter_ids: &[Uuid],
) -> Result<()> {
    sqlx::query("DELETE FROM event_fighters WHERE event_id = $1")
        .bind(event_id)
        .execute(&mut **tx)
        .await?;

    if fighter_ids.is_empty() {
        return Ok(());
    }

    // Unknown fighter ids are skipped
    sqlx::query(
        r#"
        INSERT INTO event_fighters (event_id, fighter_id)
        SELECT $1, fighter_id FROM fighters WHERE fighter_id = ANY($2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(event_id)
    .bind(fighter_ids)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn attach_fights(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
    fight_ids: &[Uuid],
) -> Result<()> {
    if fight_ids.is_empty() {
        return Ok(());
    }

    sqlx::query("UPDATE fights SET event_id = $1, updated_at = NOW() WHERE fight_id = ANY($2)")
        .bind(event_id)
        .bind(fight_ids)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
