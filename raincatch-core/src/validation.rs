//! Range checks applied to user input before it reaches the engine.

use raincatch_schemas::{
    feedback::{Feedback, MAX_COMMENT_CHARS},
    profile::{PropertyProfile, RoofType, SoilType},
};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found in one submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate_profile(profile: &PropertyProfile) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if profile.name.trim().chars().count() < 2 {
        errors.push("name", "Name must be at least 2 characters long");
    }
    if profile.location.trim().chars().count() < 3 {
        errors.push("location", "Location must be at least 3 characters long");
    }
    if !(1..=20).contains(&profile.dwellers) {
        errors.push("dwellers", "Number of dwellers must be between 1 and 20");
    }
    if !(10.0..=1000.0).contains(&profile.roof_area) {
        errors.push("roof_area", "Roof area must be between 10 and 1000 square meters");
    }
    if !(0.0..=500.0).contains(&profile.open_space) {
        errors.push("open_space", "Open space must be between 0 and 500 square meters");
    }
    if !RoofType::KNOWN.contains(&profile.roof_type) {
        errors.push("roof_type", "Roof type is required");
    }
    if profile.roof_age > 50 {
        errors.push("roof_age", "Roof age must be between 0 and 50 years");
    }
    if !SoilType::KNOWN.contains(&profile.soil_type) {
        errors.push("soil_type", "Soil type is required");
    }
    if let Some(coords) = &profile.coordinates {
        if !(-90.0..=90.0).contains(&coords.latitude) || !(-180.0..=180.0).contains(&coords.longitude) {
            errors.push("coordinates", "Coordinates must be a valid latitude and longitude");
        }
    }

    errors.into_result()
}

pub fn validate_feedback(feedback: &Feedback) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if !(1..=5).contains(&feedback.rating) {
        errors.push("rating", "Please provide a rating");
    }
    if let Some(comments) = &feedback.comments {
        if comments.chars().count() > MAX_COMMENT_CHARS {
            errors.push("comments", "Comments cannot exceed 500 characters");
        }
    }

    errors.into_result()
}
