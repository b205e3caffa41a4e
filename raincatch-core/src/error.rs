use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RaincatchError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Malformed numeric input for '{field}': {value}")]
    MalformedInput { field: &'static str, value: f64 },

    #[error("Site conditions source is missing")]
    SiteConditionsNotDefined,

    #[error("No completed assessment to save")]
    NoAssessment,

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to serialize JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
