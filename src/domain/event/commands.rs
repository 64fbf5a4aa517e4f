use chrono::NaiveDate;

use crate::resource::core::supplied;

use super::errors::EventError;
use super::model::{EventPatch, NewEvent};

// ============================================================================
// Event Commands - Raw Request Fields
// ============================================================================
//
// Text exactly as it arrived at the boundary. Creation requires every field;
// an update takes whatever was supplied and ignores empty values.
//
// ============================================================================

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default)]
pub struct EventFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

impl EventFields {
    pub fn into_draft(self) -> Result<NewEvent, EventError> {
        let title = supplied(self.title).ok_or(EventError::MissingField("title"))?;
        let description =
            supplied(self.description).ok_or(EventError::MissingField("description"))?;
        let date = supplied(self.date).ok_or(EventError::MissingField("date"))?;

        Ok(NewEvent {
            title,
            description,
            date: parse_date(&date)?,
            image: String::new(),
        })
    }

    pub fn into_patch(self) -> Result<EventPatch, EventError> {
        let date = match supplied(self.date) {
            Some(raw) => Some(parse_date(&raw)?),
            None => None,
        };

        Ok(EventPatch {
            title: supplied(self.title),
            description: supplied(self.description),
            date,
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, EventError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| EventError::InvalidDate(raw.to_string()))
}
