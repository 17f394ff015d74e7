// src/models/record.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// One logged test score. This is the unit persisted by the record store;
/// records are immutable once written.
///
/// Invariants: `marks_total >= 1` and `marks_scored <= marks_total`,
/// enforced at the form boundary before a record is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub subject: String,
    pub chapter: String,
    pub date: NaiveDate,
    pub marks_scored: u32,
    pub marks_total: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl TestRecord {
    /// Grouping key used by the aggregation engine and the tips page.
    pub fn chapter_key(&self) -> String {
        format!("{}: {}", self.subject, self.chapter)
    }
}

/// DTO for the add-test form submission.
///
/// Marks arrive as strings so a non-numeric value produces a validation
/// message instead of a framework-level rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct AddTestForm {
    #[validate(length(min = 1, max = 100, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, max = 100, message = "Chapter is required"))]
    pub chapter: String,
    pub date: String,
    pub marks_scored: String,
    pub marks_total: String,
    pub remarks: Option<String>,
}

impl AddTestForm {
    /// Validates the submission and converts it into a `TestRecord`.
    pub fn into_record(self) -> Result<TestRecord, AppError> {
        self.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest("Date must be in YYYY-MM-DD format".to_string()))?;

        let marks_scored = parse_marks("Marks scored", &self.marks_scored)?;
        let marks_total = parse_marks("Total marks", &self.marks_total)?;

        if marks_total == 0 {
            return Err(AppError::BadRequest(
                "Total marks must be at least 1".to_string(),
            ));
        }
        if marks_scored > marks_total {
            return Err(AppError::BadRequest(
                "Marks scored cannot exceed total marks".to_string(),
            ));
        }

        let remarks = self
            .remarks
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        Ok(TestRecord {
            subject: self.subject.trim().to_string(),
            chapter: self.chapter.trim().to_string(),
            date,
            marks_scored,
            marks_total,
            remarks,
        })
    }
}

fn parse_marks(field: &str, value: &str) -> Result<u32, AppError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| AppError::BadRequest(format!("{} must be a non-negative integer", field)))
}
