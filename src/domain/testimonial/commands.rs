use crate::resource::core::supplied;

use super::errors::TestimonialError;
use super::model::{NewTestimonial, TestimonialPatch};

#[derive(Debug, Clone, Default)]
pub struct TestimonialFields {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl TestimonialFields {
    pub fn into_draft(self) -> Result<NewTestimonial, TestimonialError> {
        Ok(NewTestimonial {
            name: supplied(self.name).ok_or(TestimonialError::MissingField("name"))?,
            description: supplied(self.description)
                .ok_or(TestimonialError::MissingField("description"))?,
            image: String::new(),
        })
    }

    pub fn into_patch(self) -> TestimonialPatch {
        TestimonialPatch {
            name: supplied(self.name),
            description: supplied(self.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_requires_description() {
        let result = TestimonialFields {
            name: Some("Ada".to_string()),
            description: Some(String::new()),
        }
        .into_draft();

        assert!(matches!(result, Err(TestimonialError::MissingField("description"))));
    }

    #[test]
    fn test_patch_drops_empty_name() {
        let patch = TestimonialFields {
            name: Some(String::new()),
            description: Some("Loved it".to_string()),
        }
        .into_patch();

        assert_eq!(patch.name, None);
        assert_eq!(patch.description.as_deref(), Some("Loved it"));
    }
}
