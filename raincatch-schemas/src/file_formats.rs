use crate::{profile::PropertyProfile, region::RegionalRainfallEntry};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProfileFile {
    pub schema_version: String,
    pub profiles: Vec<PropertyProfile>,
}

#[derive(Debug, Deserialize)]
pub struct RegionalRainfallFile {
    pub schema_version: String,
    pub regions: Vec<RegionalRainfallEntry>,
}
