use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use crate::domain::event::{Event, NewEvent};
use crate::domain::subscription::{EmailSubscription, NewSubscription, SubscriptionStore};
use crate::domain::testimonial::{NewTestimonial, Testimonial};
use crate::resource::core::{Record, StoreError};

use super::resource_store::ResourceStore;

// ============================================================================
// PostgreSQL Resource Store
// ============================================================================
//
// One table per record kind. `seq` is a serial column used only to return
// rows in insertion order; ids are UUIDs assigned here on create.
//
// Subscription uniqueness is a UNIQUE constraint on `address`, and admission
// uses INSERT .. ON CONFLICT DO NOTHING so check and insert are one statement.
//
// ============================================================================

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS events (
        seq BIGSERIAL,
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        date DATE NOT NULL,
        image TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS testimonials (
        seq BIGSERIAL,
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        image TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS email_subscriptions (
        seq BIGSERIAL,
        id UUID PRIMARY KEY,
        address TEXT NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
];

#[derive(Clone)]
pub struct PgResourceStore {
    pool: PgPool,
}

impl PgResourceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool against `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the tables if they do not exist yet
    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(*statement).execute(&self.pool).await?;
        }
        tracing::info!("Database schema ready");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ============================================================================
// Events
// ============================================================================

#[async_trait]
impl ResourceStore<Event> for PgResourceStore {
    #[tracing::instrument(name = "Insert event", skip(self, draft))]
    async fn create(&self, draft: NewEvent) -> Result<Event, StoreError> {
        let event = sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, description, date, image)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, title, description, date, image",
        )
        .bind(Uuid::new_v4())
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.date)
        .bind(&draft.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    #[tracing::instrument(name = "Fetch all events", skip(self))]
    async fn find_all(&self) -> Result<Vec<Event>, StoreError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, date, image FROM events ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    #[tracing::instrument(name = "Fetch event by id", skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Event, StoreError> {
        sqlx::query_as::<_, Event>(
            "SELECT id, title, description, date, image FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(Event::KIND, id))
    }

    #[tracing::instrument(name = "Update event", skip(self, event))]
    async fn update(&self, id: Uuid, event: Event) -> Result<Event, StoreError> {
        if event.id != id {
            return Err(StoreError::id_mismatch(Event::KIND, id, event.id));
        }

        sqlx::query_as::<_, Event>(
            "UPDATE events SET title = $2, description = $3, date = $4, image = $5
             WHERE id = $1
             RETURNING id, title, description, date, image",
        )
        .bind(id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(&event.image)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(Event::KIND, id))
    }

    #[tracing::instrument(name = "Delete event", skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> Result<Event, StoreError> {
        sqlx::query_as::<_, Event>(
            "DELETE FROM events WHERE id = $1
             RETURNING id, title, description, date, image",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(Event::KIND, id))
    }
}

// ============================================================================
// Testimonials
// ============================================================================

#[async_trait]
impl ResourceStore<Testimonial> for PgResourceStore {
    #[tracing::instrument(name = "Insert testimonial", skip(self, draft))]
    async fn create(&self, draft: NewTestimonial) -> Result<Testimonial, StoreError> {
        let testimonial = sqlx::query_as::<_, Testimonial>(
            "INSERT INTO testimonials (id, name, description, image)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, description, image",
        )
        .bind(Uuid::new_v4())
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(&draft.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(testimonial)
    }

    #[tracing::instrument(name = "Fetch all testimonials", skip(self))]
    async fn find_all(&self) -> Result<Vec<Testimonial>, StoreError> {
        let testimonials = sqlx::query_as::<_, Testimonial>(
            "SELECT id, name, description, image FROM testimonials ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(testimonials)
    }

    #[tracing::instrument(name = "Fetch testimonial by id", skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Testimonial, StoreError> {
        sqlx::query_as::<_, Testimonial>(
            "SELECT id, name, description, image FROM testimonials WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(Testimonial::KIND, id))
    }

    #[tracing::instrument(name = "Update testimonial", skip(self, testimonial))]
    async fn update(&self, id: Uuid, testimonial: Testimonial) -> Result<Testimonial, StoreError> {
        if testimonial.id != id {
            return Err(StoreError::id_mismatch(Testimonial::KIND, id, testimonial.id));
        }

        sqlx::query_as::<_, Testimonial>(
            "UPDATE testimonials SET name = $2, description = $3, image = $4
             WHERE id = $1
             RETURNING id, name, description, image",
        )
        .bind(id)
        .bind(&testimonial.name)
        .bind(&testimonial.description)
        .bind(&testimonial.image)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(Testimonial::KIND, id))
    }

    #[tracing::instrument(name = "Delete testimonial", skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> Result<Testimonial, StoreError> {
        sqlx::query_as::<_, Testimonial>(
            "DELETE FROM testimonials WHERE id = $1
             RETURNING id, name, description, image",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(Testimonial::KIND, id))
    }
}

// ============================================================================
// Email Subscriptions
// ============================================================================

#[async_trait]
impl ResourceStore<EmailSubscription> for PgResourceStore {
    #[tracing::instrument(name = "Insert subscription", skip(self, draft))]
    async fn create(&self, draft: NewSubscription) -> Result<EmailSubscription, StoreError> {
        let subscription = sqlx::query_as::<_, EmailSubscription>(
            "INSERT INTO email_subscriptions (id, address) VALUES ($1, $2)
             RETURNING id, address",
        )
        .bind(Uuid::new_v4())
        .bind(&draft.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(subscription)
    }

    #[tracing::instrument(name = "Fetch all subscriptions", skip(self))]
    async fn find_all(&self) -> Result<Vec<EmailSubscription>, StoreError> {
        let subscriptions = sqlx::query_as::<_, EmailSubscription>(
            "SELECT id, address FROM email_subscriptions ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions)
    }

    #[tracing::instrument(name = "Fetch subscription by id", skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<EmailSubscription, StoreError> {
        sqlx::query_as::<_, EmailSubscription>(
            "SELECT id, address FROM email_subscriptions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(EmailSubscription::KIND, id))
    }

    #[tracing::instrument(name = "Update subscription", skip(self, subscription))]
    async fn update(
        &self,
        id: Uuid,
        subscription: EmailSubscription,
    ) -> Result<EmailSubscription, StoreError> {
        if subscription.id != id {
            return Err(StoreError::id_mismatch(EmailSubscription::KIND, id, subscription.id));
        }

        sqlx::query_as::<_, EmailSubscription>(
            "UPDATE email_subscriptions SET address = $2 WHERE id = $1
             RETURNING id, address",
        )
        .bind(id)
        .bind(&subscription.address)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(EmailSubscription::KIND, id))
    }

    #[tracing::instrument(name = "Delete subscription", skip(self))]
    async fn delete_by_id(&self, id: Uuid) -> Result<EmailSubscription, StoreError> {
        sqlx::query_as::<_, EmailSubscription>(
            "DELETE FROM email_subscriptions WHERE id = $1 RETURNING id, address",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(EmailSubscription::KIND, id))
    }
}

#[async_trait]
impl SubscriptionStore for PgResourceStore {
    #[tracing::instrument(name = "Insert subscription if absent", skip(self, address))]
    async fn create_if_absent(
        &self,
        address: &str,
    ) -> Result<Option<EmailSubscription>, StoreError> {
        let subscription = sqlx::query_as::<_, EmailSubscription>(
            "INSERT INTO email_subscriptions (id, address) VALUES ($1, $2)
             ON CONFLICT (address) DO NOTHING
             RETURNING id, address",
        )
        .bind(Uuid::new_v4())
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subscription)
    }
}
