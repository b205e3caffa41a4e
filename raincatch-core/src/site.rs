//! Site conditions the engine cannot derive from the profile itself.
//!
//! Rainfall, runoff and groundwater depth would come from external data
//! services. Until those exist the engine asks a `SiteConditions` source,
//! which is either a seeded placeholder generator, a fixed set of values,
//! or a regional rainfall table in front of one of those.

use crate::error::RaincatchError;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use raincatch_schemas::{
    file_formats::RegionalRainfallFile,
    profile::PropertyProfile,
    region::{default_regional_rainfall, RegionalRainfallEntry},
};
use std::{fs, path::Path};

/// Seed used when no explicit seed is provided.
pub const DEFAULT_SEED: u64 = 42;

pub trait SiteConditions {
    /// Annual rainfall at the property, millimeters.
    fn annual_rainfall_mm(&mut self, profile: &PropertyProfile) -> f64;

    /// Fraction of roof rainfall that reaches the gutters, in [0, 1].
    fn runoff_coefficient(&mut self, profile: &PropertyProfile) -> f64;

    /// Depth to the water table, feet.
    fn water_table_depth_ft(&mut self, profile: &PropertyProfile) -> u32;
}

impl<S: SiteConditions + ?Sized> SiteConditions for Box<S> {
    fn annual_rainfall_mm(&mut self, profile: &PropertyProfile) -> f64 {
        (**self).annual_rainfall_mm(profile)
    }

    fn runoff_coefficient(&mut self, profile: &PropertyProfile) -> f64 {
        (**self).runoff_coefficient(profile)
    }

    fn water_table_depth_ft(&mut self, profile: &PropertyProfile) -> u32 {
        (**self).water_table_depth_ft(profile)
    }
}

/// Placeholder generator: rainfall 800-1200 mm, runoff 0.7-0.9, water table 10-60 ft.
///
/// Identical seeds produce identical assessments.
pub struct SeededSiteConditions {
    rng: ChaCha8Rng,
}

impl Default for SeededSiteConditions {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SeededSiteConditions {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl SiteConditions for SeededSiteConditions {
    fn annual_rainfall_mm(&mut self, _profile: &PropertyProfile) -> f64 {
        800.0 + self.rng.gen::<f64>() * 400.0
    }

    fn runoff_coefficient(&mut self, _profile: &PropertyProfile) -> f64 {
        0.7 + self.rng.gen::<f64>() * 0.2
    }

    fn water_table_depth_ft(&mut self, _profile: &PropertyProfile) -> u32 {
        (self.rng.gen::<f64>() * 50.0 + 10.0).round() as u32
    }
}

/// Returns the same values for every property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSiteConditions {
    pub annual_rainfall_mm: f64,
    pub runoff_coefficient: f64,
    pub water_table_depth_ft: u32,
}

impl Default for FixedSiteConditions {
    fn default() -> Self {
        Self {
            annual_rainfall_mm: 1000.0,
            runoff_coefficient: 0.8,
            water_table_depth_ft: 25,
        }
    }
}

impl SiteConditions for FixedSiteConditions {
    fn annual_rainfall_mm(&mut self, _profile: &PropertyProfile) -> f64 {
        self.annual_rainfall_mm
    }

    fn runoff_coefficient(&mut self, _profile: &PropertyProfile) -> f64 {
        self.runoff_coefficient
    }

    fn water_table_depth_ft(&mut self, _profile: &PropertyProfile) -> u32 {
        self.water_table_depth_ft
    }
}

/// Looks rainfall up by the profile's location label and defers everything else.
pub struct RegionalRainfall<F> {
    regions: Vec<RegionalRainfallEntry>,
    fallback: F,
}

impl<F: SiteConditions> RegionalRainfall<F> {
    pub fn new(regions: Vec<RegionalRainfallEntry>, fallback: F) -> Self {
        Self { regions, fallback }
    }

    /// Uses the built-in metro table.
    pub fn with_defaults(fallback: F) -> Self {
        Self::new(default_regional_rainfall(), fallback)
    }

    /// Loads the table from a `RegionalRainfallFile` YAML document.
    pub fn from_yaml_file(path: &Path, fallback: F) -> Result<Self, RaincatchError> {
        Ok(Self::new(load_regional_rainfall(path)?, fallback))
    }

    pub fn lookup(&self, location: &str) -> Option<&RegionalRainfallEntry> {
        find_region(&self.regions, location)
    }
}

/// Reads the region list from a `RegionalRainfallFile` YAML document.
pub fn load_regional_rainfall(path: &Path) -> Result<Vec<RegionalRainfallEntry>, RaincatchError> {
    let display = path.display().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| RaincatchError::FileIO(display.clone(), e))?;
    let file: RegionalRainfallFile =
        serde_yaml::from_str(&content).map_err(|e| RaincatchError::YamlParsing(display, e))?;
    Ok(file.regions)
}

/// Finds the first region whose name appears in the location, ignoring case.
pub fn find_region<'a>(
    regions: &'a [RegionalRainfallEntry],
    location: &str,
) -> Option<&'a RegionalRainfallEntry> {
    let location = location.to_lowercase();
    regions
        .iter()
        .find(|r| location.contains(&r.region.to_lowercase()))
}

impl<F: SiteConditions> SiteConditions for RegionalRainfall<F> {
    fn annual_rainfall_mm(&mut self, profile: &PropertyProfile) -> f64 {
        match self.lookup(&profile.location) {
            Some(entry) => {
                debug!("Using regional rainfall for '{}': {} mm", entry.region, entry.annual_mm);
                entry.annual_mm
            }
            None => {
                debug!("No regional rainfall for '{}', using fallback", profile.location);
                self.fallback.annual_rainfall_mm(profile)
            }
        }
    }

    fn runoff_coefficient(&mut self, profile: &PropertyProfile) -> f64 {
        self.fallback.runoff_coefficient(profile)
    }

    fn water_table_depth_ft(&mut self, profile: &PropertyProfile) -> u32 {
        self.fallback.water_table_depth_ft(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_draws_stay_within_placeholder_ranges() {
        let profile = PropertyProfile::default();
        let mut site = SeededSiteConditions::from_seed_u64(7);
        for _ in 0..500 {
            let rain = site.annual_rainfall_mm(&profile);
            let runoff = site.runoff_coefficient(&profile);
            let depth = site.water_table_depth_ft(&profile);
            assert!((800.0..=1200.0).contains(&rain));
            assert!((0.7..=0.9).contains(&runoff));
            assert!((10..=60).contains(&depth));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let profile = PropertyProfile::default();
        let mut a = SeededSiteConditions::from_seed_u64(99);
        let mut b = SeededSiteConditions::from_seed_u64(99);
        for _ in 0..10 {
            assert_eq!(a.annual_rainfall_mm(&profile), b.annual_rainfall_mm(&profile));
            assert_eq!(a.runoff_coefficient(&profile), b.runoff_coefficient(&profile));
        }
    }

    #[test]
    fn regional_lookup_is_case_insensitive_with_fallback() {
        let mut site = RegionalRainfall::with_defaults(FixedSiteConditions::default());
        let mumbai = PropertyProfile {
            location: "south mumbai, Maharashtra".to_string(),
            ..Default::default()
        };
        let elsewhere = PropertyProfile {
            location: "Shimla".to_string(),
            ..Default::default()
        };
        assert_eq!(site.annual_rainfall_mm(&mumbai), 1200.0);
        assert_eq!(site.annual_rainfall_mm(&elsewhere), 1000.0);
        assert_eq!(site.runoff_coefficient(&mumbai), 0.8);
        assert_eq!(site.water_table_depth_ft(&mumbai), 25);
    }

    #[test]
    fn find_region_exposes_monsoon_months() {
        let regions = default_regional_rainfall();
        let chennai = find_region(&regions, "Adyar, CHENNAI").unwrap();
        assert_eq!(chennai.region, "Chennai");
        assert_eq!(chennai.monsoon_months, vec![6, 7, 8, 10, 11]);
        assert!(find_region(&regions, "Leh").is_none());
    }
}
