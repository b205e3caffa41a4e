//! Defines the property attributes a homeowner submits for a rainwater harvesting assessment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roofing material of the catchment surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoofType {
    Concrete,
    Metal,
    Tile,
    Asphalt,
    /// Any material the assessment does not have a coefficient for.
    #[serde(other)]
    Other,
}

impl RoofType {
    pub const KNOWN: [RoofType; 4] = [
        RoofType::Concrete,
        RoofType::Metal,
        RoofType::Tile,
        RoofType::Asphalt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RoofType::Concrete => "Concrete",
            RoofType::Metal => "Metal/Tin",
            RoofType::Tile => "Clay Tile",
            RoofType::Asphalt => "Asphalt Shingle",
            RoofType::Other => "Other",
        }
    }
}

/// Dominant soil type at the property, which drives the recharge structure choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Sandy,
    Loamy,
    Clay,
    Silt,
    Rocky,
    #[serde(other)]
    Unknown,
}

impl SoilType {
    pub const KNOWN: [SoilType; 5] = [
        SoilType::Sandy,
        SoilType::Loamy,
        SoilType::Clay,
        SoilType::Silt,
        SoilType::Rocky,
    ];
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SoilType::Sandy => "Sandy",
            SoilType::Loamy => "Loamy",
            SoilType::Clay => "Clay",
            SoilType::Silt => "Silt",
            SoilType::Rocky => "Rocky",
            SoilType::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Everything the submission form collects about a property.
///
/// Ranges are enforced by validation before an assessment runs; the
/// struct itself accepts any value so that partially filled forms can be
/// held in session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyProfile {
    pub name: String,
    pub location: String,
    /// Number of people living at the property (1-20).
    pub dwellers: u32,
    /// Catchment roof area in square meters (10-1000).
    pub roof_area: f64,
    /// Open ground available for recharge structures, square meters (0-500).
    pub open_space: f64,
    pub roof_type: RoofType,
    /// Age of the roof in years (0-50).
    pub roof_age: u32,
    pub soil_type: SoilType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Default for PropertyProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            dwellers: 4,
            roof_area: 100.0,
            open_space: 50.0,
            roof_type: RoofType::Concrete,
            roof_age: 5,
            soil_type: SoilType::Loamy,
            coordinates: None,
        }
    }
}

/// A partial profile. Every field that is `Some` overwrites the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub dwellers: Option<u32>,
    pub roof_area: Option<f64>,
    pub open_space: Option<f64>,
    pub roof_type: Option<RoofType>,
    pub roof_age: Option<u32>,
    pub soil_type: Option<SoilType>,
    pub coordinates: Option<Coordinates>,
}

impl ProfilePatch {
    /// Applies the patch on top of `profile`, later keys win.
    pub fn apply_to(self, mut profile: PropertyProfile) -> PropertyProfile {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(location) = self.location {
            profile.location = location;
        }
        if let Some(dwellers) = self.dwellers {
            profile.dwellers = dwellers;
        }
        if let Some(roof_area) = self.roof_area {
            profile.roof_area = roof_area;
        }
        if let Some(open_space) = self.open_space {
            profile.open_space = open_space;
        }
        if let Some(roof_type) = self.roof_type {
            profile.roof_type = roof_type;
        }
        if let Some(roof_age) = self.roof_age {
            profile.roof_age = roof_age;
        }
        if let Some(soil_type) = self.soil_type {
            profile.soil_type = soil_type;
        }
        if let Some(coordinates) = self.coordinates {
            profile.coordinates = Some(coordinates);
        }
        profile
    }
}

/// A single-field edit, as produced by one form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProfileField {
    Name(String),
    Location(String),
    Dwellers(u32),
    RoofArea(f64),
    OpenSpace(f64),
    RoofType(RoofType),
    RoofAge(u32),
    SoilType(SoilType),
    Coordinates(Option<Coordinates>),
}

impl ProfileField {
    pub fn apply_to(self, mut profile: PropertyProfile) -> PropertyProfile {
        match self {
            ProfileField::Name(v) => profile.name = v,
            ProfileField::Location(v) => profile.location = v,
            ProfileField::Dwellers(v) => profile.dwellers = v,
            ProfileField::RoofArea(v) => profile.roof_area = v,
            ProfileField::OpenSpace(v) => profile.open_space = v,
            ProfileField::RoofType(v) => profile.roof_type = v,
            ProfileField::RoofAge(v) => profile.roof_age = v,
            ProfileField::SoilType(v) => profile.soil_type = v,
            ProfileField::Coordinates(v) => profile.coordinates = v,
        }
        profile
    }
}
