//! Surfaces outside the engine that a session hands its results to.
//!
//! Implementations are constructed by the caller and passed in explicitly.

use crate::error::RaincatchError;
use raincatch_schemas::{
    assessment::AssessmentRecord, feedback::Feedback, profile::Coordinates,
};

/// Somewhere finished assessments are kept.
pub trait AssessmentStore {
    fn save_assessment(&mut self, record: &AssessmentRecord) -> Result<(), RaincatchError>;
}

/// Somewhere user feedback is sent.
pub trait FeedbackSink {
    fn submit_feedback(&mut self, feedback: &Feedback) -> Result<(), RaincatchError>;
}

/// Link that opens the property in Google Earth, where the roof area can be measured.
pub fn google_earth_link(coordinates: &Coordinates) -> String {
    format!(
        "https://earth.google.com/web/search/{},{}",
        coordinates.latitude, coordinates.longitude
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_link_embeds_lat_lng() {
        let link = google_earth_link(&Coordinates {
            latitude: 19.076,
            longitude: 72.8777,
        });
        assert_eq!(link, "https://earth.google.com/web/search/19.076,72.8777");
    }
}
