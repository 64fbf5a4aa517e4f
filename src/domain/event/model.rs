use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resource::core::{merge_field, Content, Record};

// ============================================================================
// Event Record
// ============================================================================

/// A promotional event shown on the public events page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    /// Stored image reference, empty when the event has no image
    pub image: String,
}

/// Fields of an event before the store assigns its id
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub image: String,
}

/// Candidate values for a partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl Event {
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

impl Record for Event {
    type Draft = NewEvent;

    const KIND: &'static str = "Event";

    fn from_draft(id: Uuid, draft: NewEvent) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            date: draft.date,
            image: draft.image,
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Content for Event {
    type Patch = EventPatch;

    fn attach_image(draft: &mut NewEvent, reference: String) {
        draft.image = reference;
    }

    fn merge(&self, patch: EventPatch, image: Option<String>) -> Self {
        Self {
            id: self.id,
            title: merge_field(&self.title, patch.title),
            description: merge_field(&self.description, patch.description),
            date: merge_field(&self.date, patch.date),
            image: merge_field(&self.image, image),
        }
    }

    fn image(&self) -> &str {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gala() -> Event {
        Event::from_draft(
            Uuid::new_v4(),
            NewEvent {
                title: "Gala".to_string(),
                description: "Annual gala".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                image: String::new(),
            },
        )
    }

    #[test]
    fn test_from_draft_keeps_fields() {
        let event = gala();

        assert_eq!(event.title, "Gala");
        assert_eq!(event.description, "Annual gala");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(!event.has_image());
    }

    #[test]
    fn test_merge_only_description() {
        let event = gala();
        let patch = EventPatch {
            description: Some("Annual charity gala".to_string()),
            ..Default::default()
        };

        let merged = event.merge(patch, None);

        assert_eq!(merged.id, event.id);
        assert_eq!(merged.title, event.title);
        assert_eq!(merged.date, event.date);
        assert_eq!(merged.image, event.image);
        assert_eq!(merged.description, "Annual charity gala");
    }

    #[test]
    fn test_merge_empty_patch_is_identity() {
        let event = gala();

        assert_eq!(event.merge(EventPatch::default(), None), event);
    }

    #[test]
    fn test_merge_replaces_image_only_when_stored() {
        let mut event = gala();
        event.image = "old.png".to_string();

        let kept = event.merge(EventPatch::default(), None);
        assert_eq!(kept.image, "old.png");

        let replaced = event.merge(EventPatch::default(), Some("new.png".to_string()));
        assert_eq!(replaced.image, "new.png");
    }
}
