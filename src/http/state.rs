use std::sync::Arc;

use crate::auth::AuthGate;
use crate::domain::event::{Event, EventCommandHandler};
use crate::domain::subscription::{EmailSubscription, SubscriptionGuard, SubscriptionStore};
use crate::domain::testimonial::{Testimonial, TestimonialCommandHandler};
use crate::media::ImageAttachmentHandler;
use crate::metrics::Metrics;
use crate::resource::store::{InMemoryStore, PgResourceStore, ResourceStore};

/// One store per collection
pub struct Stores {
    pub events: Arc<dyn ResourceStore<Event>>,
    pub testimonials: Arc<dyn ResourceStore<Testimonial>>,
    pub subscriptions: Arc<dyn SubscriptionStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            events: Arc::new(InMemoryStore::<Event>::new()),
            testimonials: Arc::new(InMemoryStore::<Testimonial>::new()),
            subscriptions: Arc::new(InMemoryStore::<EmailSubscription>::new()),
        }
    }

    /// All three collections backed by one connection pool
    pub fn postgres(store: PgResourceStore) -> Self {
        let store = Arc::new(store);
        Self {
            events: store.clone(),
            testimonials: store.clone(),
            subscriptions: store,
        }
    }
}

/// Shared application state handed to every request handler
pub struct AppState {
    pub events: EventCommandHandler,
    pub testimonials: TestimonialCommandHandler,
    pub subscriptions: SubscriptionGuard,
    pub auth: AuthGate,
    pub upload_max_bytes: usize,
}

impl AppState {
    pub fn new(
        stores: Stores,
        images: Arc<ImageAttachmentHandler>,
        auth: AuthGate,
        metrics: Arc<Metrics>,
        upload_max_bytes: usize,
    ) -> Self {
        Self {
            events: EventCommandHandler::new(stores.events, images.clone(), metrics.clone()),
            testimonials: TestimonialCommandHandler::new(stores.testimonials, images, metrics.clone()),
            subscriptions: SubscriptionGuard::new(stores.subscriptions, metrics),
            auth,
            upload_max_bytes,
        }
    }
}
