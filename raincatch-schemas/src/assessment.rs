use crate::profile::{PropertyProfile, SoilType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The recharge or storage structure suggested for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendedStructure {
    #[serde(rename = "Percolation Pit")]
    PercolationPit,
    #[serde(rename = "Surface Storage Tank")]
    SurfaceStorageTank,
    #[serde(rename = "Recharge Well")]
    RechargeWell,
    #[serde(rename = "Underground Tank")]
    UndergroundTank,
}

impl fmt::Display for RecommendedStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecommendedStructure::PercolationPit => "Percolation Pit",
            RecommendedStructure::SurfaceStorageTank => "Surface Storage Tank",
            RecommendedStructure::RechargeWell => "Recharge Well",
            RecommendedStructure::UndergroundTank => "Underground Tank",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AquiferType {
    Unconfined,
    Confined,
    #[serde(rename = "Semi-confined")]
    SemiConfined,
}

impl fmt::Display for AquiferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AquiferType::Unconfined => "Unconfined",
            AquiferType::Confined => "Confined",
            AquiferType::SemiConfined => "Semi-confined",
        };
        f.write_str(name)
    }
}

/// Years until cumulative savings cover the installation cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "years", rename_all = "snake_case")]
pub enum PaybackPeriod {
    Years(u32),
    /// Annual savings are zero, so the investment is never recovered.
    NotRecoverable,
}

impl PaybackPeriod {
    pub fn years(&self) -> Option<u32> {
        match self {
            PaybackPeriod::Years(years) => Some(*years),
            PaybackPeriod::NotRecoverable => None,
        }
    }
}

impl fmt::Display for PaybackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaybackPeriod::Years(years) => write!(f, "{} years", years),
            PaybackPeriod::NotRecoverable => f.write_str("not recoverable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    /// Liters per year returned to the aquifer.
    pub groundwater_recharge: f64,
    /// Kilograms of CO2 avoided per year.
    pub co2_reduction: f64,
    /// Kilowatt hours saved per year on pumping and treatment.
    pub energy_savings: f64,
}

/// Where the rain falling on the roof ends up over a year, in liters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterBalance {
    pub total_rainfall: f64,
    pub harvestable: f64,
    pub surface_runoff: f64,
    pub evaporation_and_loss: f64,
}

/// One point of the cumulative cash flow after installation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: u32,
    pub cumulative_savings: f64,
}

/// The derived figures for one submitted profile. Never mutated once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Millimeters per year.
    pub annual_rainfall: f64,
    pub runoff_coefficient: f64,
    pub collection_efficiency: f64,
    pub storage_efficiency: f64,
    pub overall_efficiency: f64,
    /// Liters per year.
    pub harvestable_water: f64,
    pub recommended_structure: RecommendedStructure,
    pub installation_cost: f64,
    pub annual_savings: f64,
    pub payback_period: PaybackPeriod,
    pub environmental_impact: EnvironmentalImpact,
    pub aquifer_type: AquiferType,
    /// Depth to the water table, feet.
    pub water_table_depth: u32,
    pub soil_type: SoilType,
    /// Millimeters per hour.
    pub infiltration_rate: f64,
    /// Harvestable water capped by what the household actually uses, liters per year.
    pub potential_savings: f64,
    pub water_balance: WaterBalance,
}

/// A finished assessment as handed to the persistence surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub assessment_id: String,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
    pub profile: PropertyProfile,
    pub result: AssessmentResult,
}
