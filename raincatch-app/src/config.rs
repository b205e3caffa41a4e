use anyhow::{Context, Result};
use log::info;
use raincatch_core::{
    assessment::{builder::AssessmentEngineBuilder, engine::{AssessmentEngine, Pricing}},
    format::DEFAULT_CURRENCY,
    site::{load_regional_rainfall, RegionalRainfall, SeededSiteConditions, DEFAULT_SEED},
};
use raincatch_schemas::{
    file_formats::ProfileFile,
    profile::PropertyProfile,
    region::{default_regional_rainfall, RegionalRainfallEntry},
};
use serde::Deserialize;
use std::{fs, path::{Path, PathBuf}};

/// Settings for a raincatch run, read from YAML. Every field has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seed for the placeholder rainfall and groundwater draws.
    pub seed: u64,
    pub currency_symbol: String,
    /// Length of the cumulative savings projection.
    pub projection_years: u32,
    pub ledger_path: PathBuf,
    pub feedback_path: PathBuf,
    pub pricing: Pricing,
    /// Optional `RegionalRainfallFile` replacing the built-in metro table.
    pub rainfall_table: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            currency_symbol: DEFAULT_CURRENCY.to_string(),
            projection_years: 10,
            ledger_path: PathBuf::from("./data/assessments.csv"),
            feedback_path: PathBuf::from("./data/feedback.csv"),
            pricing: Pricing::default(),
            rainfall_table: None,
        }
    }
}

impl AppConfig {
    /// Loads the config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        info!("Loading configuration from {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))
    }

    /// The configured rainfall table, or the built-in metro table.
    pub fn rainfall_regions(&self) -> Result<Vec<RegionalRainfallEntry>> {
        match &self.rainfall_table {
            Some(table) => load_regional_rainfall(table)
                .with_context(|| format!("Failed to load rainfall table {:?}", table)),
            None => Ok(default_regional_rainfall()),
        }
    }

    /// Builds an engine backed by the regional table in front of the seeded generator.
    pub fn build_engine(
        &self,
        seed_override: Option<u64>,
        regions: Vec<RegionalRainfallEntry>,
    ) -> Result<AssessmentEngine> {
        let fallback = SeededSiteConditions::from_seed_u64(seed_override.unwrap_or(self.seed));
        let site = RegionalRainfall::new(regions, fallback);
        let engine = AssessmentEngineBuilder::new()
            .with_site_conditions(site)
            .with_pricing(self.pricing)
            .build()?;
        Ok(engine)
    }
}

/// Reads a single profile from a YAML document.
pub fn load_profile(path: &Path) -> Result<PropertyProfile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile: {:?}", path))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse YAML from {:?}", path))
}

/// Loads every profile from every `ProfileFile` YAML document in a directory.
pub fn load_profiles_from_dir<P: AsRef<Path>>(dir_path: P) -> Result<Vec<PropertyProfile>> {
    load_yaml_files(dir_path, |file: ProfileFile| file.profiles)
}

/// Generic helper to load all YAML files in a directory, in file-name order.
fn load_yaml_files<P, F, E, T>(dir_path: P, extract_vec: E) -> Result<Vec<T>>
where
    P: AsRef<Path>,
    F: for<'de> serde::Deserialize<'de>, // The file wrapper struct (e.g., ProfileFile)
    E: Fn(F) -> Vec<T>,                  // A closure to extract the Vec<T> from the wrapper
{
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path.as_ref())
        .with_context(|| format!("Failed to read directory: {:?}", dir_path.as_ref()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut items = Vec::new();
    for path in paths {
        let content = fs::read_to_string(&path)?;
        let file_wrapper: F = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))?;
        items.extend(extract_vec(file_wrapper));
    }
    Ok(items)
}
