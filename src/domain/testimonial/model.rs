use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resource::core::{merge_field, Content, Record};

// ============================================================================
// Testimonial Record
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTestimonial {
    pub name: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestimonialPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Record for Testimonial {
    type Draft = NewTestimonial;

    const KIND: &'static str = "Testimonial";

    fn from_draft(id: Uuid, draft: NewTestimonial) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            image: draft.image,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Content for Testimonial {
    type Patch = TestimonialPatch;

    fn attach_image(draft: &mut NewTestimonial, reference: String) {
        draft.image = reference;
    }

    fn merge(&self, patch: TestimonialPatch, image: Option<String>) -> Self {
        Self {
            id: self.id,
            name: merge_field(&self.name, patch.name),
            description: merge_field(&self.description, patch.description),
            image: merge_field(&self.image, image),
        }
    }

    fn image(&self) -> &str {
        &self.image
    }
}
