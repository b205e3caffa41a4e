use serde::{Deserialize, Serialize};

/// Long-term rainfall figures for a named region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalRainfallEntry {
    pub region: String,
    /// Average annual rainfall in millimeters.
    pub annual_mm: f64,
    /// Months (1-12) in which the monsoon delivers most of the rain.
    #[serde(default)]
    pub monsoon_months: Vec<u8>,
}

impl RegionalRainfallEntry {
    pub fn new(region: &str, annual_mm: f64, monsoon_months: &[u8]) -> Self {
        Self {
            region: region.to_string(),
            annual_mm,
            monsoon_months: monsoon_months.to_vec(),
        }
    }
}

/// The built-in table of Indian metro rainfall averages.
pub fn default_regional_rainfall() -> Vec<RegionalRainfallEntry> {
    vec![
        RegionalRainfallEntry::new("Mumbai", 1200.0, &[6, 7, 8, 9]),
        RegionalRainfallEntry::new("Delhi", 650.0, &[6, 7, 8]),
        RegionalRainfallEntry::new("Chennai", 1400.0, &[6, 7, 8, 10, 11]),
        RegionalRainfallEntry::new("Bangalore", 950.0, &[6, 7, 8, 9, 10]),
        RegionalRainfallEntry::new("Hyderabad", 800.0, &[6, 7, 8, 9]),
        RegionalRainfallEntry::new("Pune", 850.0, &[6, 7, 8, 9]),
    ]
}
