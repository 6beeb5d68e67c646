use sqlx::PgPool;
use storage::{
    dto::event::{CreateEventRequest, EventDetailResponse, UpdateEventRequest},
    error::Result,
    models::Event,
    repository::event::EventRepository,
};
use uuid::Uuid;

pub async fn list_events(pool: &PgPool) -> Result<Vec<Event>> {
    let repo = EventRepository::new(pool);
    repo.list().await
}

pub async fn list_upcoming_events(pool: &PgPool) -> Result<Vec<Event>> {
    let repo = EventRepository::new(pool);
    repo.list_upcoming().await
}

pub async fn get_event_detailed(pool: &PgPool, id: Uuid) -> Result<EventDetailResponse> {
    let repo = EventRepository::new(pool);
    repo.find_detailed(id).await
}

pub async fn create_event(pool: &PgPool, request: &CreateEventRequest) -> Result<Event> {
    let repo = EventRepository::new(pool);
    repo.create(request).await
}

pub async fn update_event(pool: &PgPool, id: Uuid, request: &UpdateEventRequest) -> Result<Event> {
    let repo = EventRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(id, &existing, request).await
}

pub async fn delete_event(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = EventRepository::new(pool);
    repo.delete(id).await
}
