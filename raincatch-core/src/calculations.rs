//! Pure calculation functions behind an assessment.
//!
//! None of these functions draw random numbers or touch I/O, so the same
//! arguments always give the same answer.

use raincatch_schemas::{
    assessment::{
        AquiferType, EnvironmentalImpact, PaybackPeriod, ProjectionPoint, RecommendedStructure,
        WaterBalance,
    },
    profile::{RoofType, SoilType},
};

/// Share of harvested water that ends up recharging groundwater.
pub const RECHARGE_FRACTION: f64 = 0.7;
/// Kilograms of CO2 avoided per liter harvested.
pub const CO2_KG_PER_LITER: f64 = 0.0005;
/// Kilowatt hours of pumping and treatment avoided per liter harvested.
pub const ENERGY_KWH_PER_LITER: f64 = 0.003;
/// Daily household consumption per person, liters.
pub const DAILY_DEMAND_PER_DWELLER_L: f64 = 150.0;
/// Fraction of roof rainfall lost as surface runoff before collection.
pub const SURFACE_RUNOFF_FRACTION: f64 = 0.2;
const DEFAULT_ROOF_EFFICIENCY: f64 = 0.75;
const DEFAULT_INFILTRATION_MM_HR: f64 = 8.0;

/// Rounds to two decimal places, the precision every ratio is reported at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn compute_collection_efficiency(roof_type: RoofType, roof_age: u32) -> f64 {
    let base = match roof_type {
        RoofType::Concrete => 0.8,
        RoofType::Metal => 0.9,
        RoofType::Tile => 0.75,
        RoofType::Asphalt => 0.7,
        RoofType::Other => DEFAULT_ROOF_EFFICIENCY,
    };

    let age_factor = if roof_age > 20 {
        0.8
    } else if roof_age > 10 {
        0.9
    } else {
        1.0
    };

    round2(base * age_factor)
}

pub fn compute_storage_efficiency(roof_area: f64) -> f64 {
    if roof_area > 200.0 {
        0.95
    } else if roof_area > 100.0 {
        0.90
    } else if roof_area > 50.0 {
        0.85
    } else {
        0.80
    }
}

/// Product of the three efficiencies. Inputs are expected in [0, 1] and are not clamped.
pub fn compute_overall_efficiency(runoff: f64, collection: f64, storage: f64) -> f64 {
    round2(runoff * collection * storage)
}

pub fn compute_environmental_impact(harvestable_water: f64) -> EnvironmentalImpact {
    EnvironmentalImpact {
        groundwater_recharge: (harvestable_water * RECHARGE_FRACTION).round(),
        co2_reduction: round2(harvestable_water * CO2_KG_PER_LITER),
        energy_savings: round2(harvestable_water * ENERGY_KWH_PER_LITER),
    }
}

/// Cumulative cash position for year 0 through `years` inclusive.
pub fn compute_financial_projection(
    installation_cost: f64,
    annual_savings: f64,
    years: u32,
) -> Vec<ProjectionPoint> {
    let mut projection = Vec::with_capacity(years as usize + 1);
    let mut cumulative = -installation_cost;

    for year in 0..=years {
        if year > 0 {
            cumulative += annual_savings;
        }
        projection.push(ProjectionPoint {
            year,
            cumulative_savings: cumulative.round(),
        });
    }
    projection
}

pub fn recommend_structure(soil_type: SoilType) -> RecommendedStructure {
    match soil_type {
        SoilType::Sandy => RecommendedStructure::PercolationPit,
        SoilType::Clay => RecommendedStructure::SurfaceStorageTank,
        SoilType::Loamy => RecommendedStructure::RechargeWell,
        _ => RecommendedStructure::UndergroundTank,
    }
}

/// Fixed construction cost of a structure, on top of the per-area cost.
pub fn structure_base_cost(structure: RecommendedStructure) -> f64 {
    match structure {
        RecommendedStructure::PercolationPit => 35_000.0,
        RecommendedStructure::SurfaceStorageTank => 60_000.0,
        RecommendedStructure::RechargeWell => 45_000.0,
        RecommendedStructure::UndergroundTank => 50_000.0,
    }
}

pub fn classify_aquifer(soil_type: SoilType) -> AquiferType {
    match soil_type {
        SoilType::Sandy => AquiferType::Unconfined,
        SoilType::Clay => AquiferType::Confined,
        _ => AquiferType::SemiConfined,
    }
}

/// Infiltration rate in mm/hr for the given soil.
pub fn infiltration_rate(soil_type: SoilType) -> f64 {
    match soil_type {
        SoilType::Sandy => 20.0,
        SoilType::Loamy => 10.0,
        SoilType::Clay => 3.0,
        SoilType::Silt => 6.0,
        SoilType::Rocky => 8.0,
        SoilType::Unknown => DEFAULT_INFILTRATION_MM_HR,
    }
}

pub fn compute_payback_period(installation_cost: f64, annual_savings: f64) -> PaybackPeriod {
    if annual_savings <= 0.0 || !annual_savings.is_finite() {
        return PaybackPeriod::NotRecoverable;
    }
    let years = (installation_cost / annual_savings).round();
    if years.is_finite() && years >= 0.0 {
        PaybackPeriod::Years(years as u32)
    } else {
        PaybackPeriod::NotRecoverable
    }
}

/// Harvested water the household can actually use, capped by annual demand.
pub fn compute_potential_savings(harvestable_water: f64, dwellers: u32) -> f64 {
    let annual_demand = f64::from(dwellers) * DAILY_DEMAND_PER_DWELLER_L * 365.0;
    harvestable_water.min(annual_demand)
}

/// Splits the rain falling on the roof (mm x m2 = liters) into harvested, runoff and lost water.
pub fn compute_water_balance(
    harvestable_water: f64,
    annual_rainfall: f64,
    roof_area: f64,
) -> WaterBalance {
    let total_rainfall = annual_rainfall * roof_area;
    let surface_runoff = total_rainfall * SURFACE_RUNOFF_FRACTION;
    WaterBalance {
        total_rainfall,
        harvestable: harvestable_water,
        surface_runoff,
        evaporation_and_loss: total_rainfall - harvestable_water - surface_runoff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn collection_efficiency_stays_in_unit_range_and_degrades_with_age() {
        for roof in RoofType::KNOWN {
            let mut previous = f64::INFINITY;
            for age in 0..=50 {
                let eff = compute_collection_efficiency(roof, age);
                assert!((0.0..=1.0).contains(&eff), "{:?} at {} years gave {}", roof, age, eff);
                assert!(eff <= previous + 1e-12);
                previous = eff;
            }
        }
    }

    #[test]
    fn collection_efficiency_age_thresholds() {
        assert_relative_eq!(compute_collection_efficiency(RoofType::Metal, 10), 0.9);
        assert_relative_eq!(compute_collection_efficiency(RoofType::Metal, 11), 0.81);
        assert_relative_eq!(compute_collection_efficiency(RoofType::Metal, 21), 0.72);
        assert_relative_eq!(compute_collection_efficiency(RoofType::Other, 0), 0.75);
    }

    #[test]
    fn storage_efficiency_is_non_decreasing_in_area() {
        let mut previous = 0.0;
        for area in 10..=1000 {
            let eff = compute_storage_efficiency(f64::from(area));
            assert!(eff >= previous);
            previous = eff;
        }
        assert_relative_eq!(compute_storage_efficiency(100.0), 0.85);
        assert_relative_eq!(compute_storage_efficiency(100.5), 0.90);
        assert_relative_eq!(compute_storage_efficiency(201.0), 0.95);
    }

    #[test]
    fn overall_efficiency_is_rounded_product() {
        let samples = [(0.8, 0.8, 0.9), (0.75, 0.72, 0.95), (0.9, 0.6, 0.8), (1.0, 1.0, 1.0)];
        for (a, b, c) in samples {
            assert_eq!(compute_overall_efficiency(a, b, c), ((a * b * c) * 100.0_f64).round() / 100.0);
        }
    }

    #[test]
    fn financial_projection_breaks_even_in_year_five() {
        let projection = compute_financial_projection(100_000.0, 20_000.0, 10);
        assert_eq!(projection.len(), 11);
        assert_eq!(projection[0].cumulative_savings, -100_000.0);
        assert_eq!(projection[5].cumulative_savings, 0.0);
        assert_eq!(projection[10].cumulative_savings, 100_000.0);
        assert_eq!(projection[10].year, 10);
    }

    #[test]
    fn environmental_impact_has_no_hidden_state() {
        let first = compute_environmental_impact(100_000.0);
        let second = compute_environmental_impact(100_000.0);
        assert_eq!(first, second);
        assert_relative_eq!(first.groundwater_recharge, 70_000.0);
        assert_relative_eq!(first.co2_reduction, 50.0);
        assert_relative_eq!(first.energy_savings, 300.0);
    }

    #[test]
    fn soil_decides_structure_and_aquifer() {
        assert_eq!(recommend_structure(SoilType::Sandy), RecommendedStructure::PercolationPit);
        assert_eq!(classify_aquifer(SoilType::Sandy), AquiferType::Unconfined);
        assert_eq!(recommend_structure(SoilType::Clay), RecommendedStructure::SurfaceStorageTank);
        assert_eq!(classify_aquifer(SoilType::Clay), AquiferType::Confined);
        assert_eq!(recommend_structure(SoilType::Loamy), RecommendedStructure::RechargeWell);
        assert_eq!(classify_aquifer(SoilType::Loamy), AquiferType::SemiConfined);
        for soil in [SoilType::Silt, SoilType::Rocky, SoilType::Unknown] {
            assert_eq!(recommend_structure(soil), RecommendedStructure::UndergroundTank);
            assert_eq!(classify_aquifer(soil), AquiferType::SemiConfined);
        }
    }

    #[test]
    fn payback_is_guarded_against_zero_savings() {
        assert_eq!(compute_payback_period(63_000.0, 0.0), PaybackPeriod::NotRecoverable);
        assert_eq!(compute_payback_period(63_000.0, 2_000.0), PaybackPeriod::Years(32));
        assert_eq!(compute_payback_period(100_000.0, 20_000.0), PaybackPeriod::Years(5));
    }

    #[test]
    fn potential_savings_capped_by_household_demand() {
        // 2 people use 109 500 L a year.
        assert_relative_eq!(compute_potential_savings(200_000.0, 2), 109_500.0);
        assert_relative_eq!(compute_potential_savings(50_000.0, 2), 50_000.0);
    }

    #[test]
    fn water_balance_accounts_for_all_rain() {
        let balance = compute_water_balance(60_000.0, 1000.0, 100.0);
        assert_relative_eq!(balance.total_rainfall, 100_000.0);
        assert_relative_eq!(balance.surface_runoff, 20_000.0);
        assert_relative_eq!(balance.evaporation_and_loss, 20_000.0);
        assert_relative_eq!(
            balance.harvestable + balance.surface_runoff + balance.evaporation_and_loss,
            balance.total_rainfall
        );
    }
}
