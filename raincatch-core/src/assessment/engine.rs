use crate::{
    calculations::{
        classify_aquifer, compute_collection_efficiency, compute_environmental_impact,
        compute_overall_efficiency, compute_payback_period, compute_potential_savings,
        compute_storage_efficiency, compute_water_balance, infiltration_rate, recommend_structure,
        structure_base_cost,
    },
    error::RaincatchError,
    site::SiteConditions,
};
use log::{debug, info};
use raincatch_schemas::{assessment::AssessmentResult, profile::PropertyProfile};
use serde::{Deserialize, Serialize};

/// Unit prices used for the cost/benefit figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Installation cost per square meter of roof.
    pub cost_per_sq_m: f64,
    /// Value of one liter of harvested water.
    pub savings_per_liter: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            cost_per_sq_m: 150.0,
            savings_per_liter: 0.02,
        }
    }
}

pub struct AssessmentEngine {
    pub(super) site: Box<dyn SiteConditions>,
    pub(super) pricing: Pricing,
}

impl AssessmentEngine {
    /// Derives all assessment figures for one profile.
    ///
    /// The profile is assumed to be validated already. Only values that
    /// would poison the arithmetic (NaN, infinities, a negative roof area)
    /// are rejected here.
    pub fn run_assessment(
        &mut self,
        profile: &PropertyProfile,
    ) -> Result<AssessmentResult, RaincatchError> {
        ensure_usable("roof_area", profile.roof_area)?;

        let annual_rainfall = self.site.annual_rainfall_mm(profile);
        let runoff_coefficient = self.site.runoff_coefficient(profile);
        let water_table_depth = self.site.water_table_depth_ft(profile);
        ensure_usable("annual_rainfall", annual_rainfall)?;
        ensure_usable("runoff_coefficient", runoff_coefficient)?;

        let collection_efficiency =
            compute_collection_efficiency(profile.roof_type, profile.roof_age);
        let storage_efficiency = compute_storage_efficiency(profile.roof_area);

        let harvestable_water = (profile.roof_area
            * annual_rainfall
            * runoff_coefficient
            * collection_efficiency)
            .round();

        let recommended_structure = recommend_structure(profile.soil_type);
        let installation_cost = (profile.roof_area * self.pricing.cost_per_sq_m
            + structure_base_cost(recommended_structure))
        .round();
        let annual_savings = (harvestable_water * self.pricing.savings_per_liter).round();
        let payback_period = compute_payback_period(installation_cost, annual_savings);

        debug!(
            "Assessment for '{}': rainfall {:.1} mm, runoff {:.3}, harvestable {} L",
            profile.name, annual_rainfall, runoff_coefficient, harvestable_water
        );

        let result = AssessmentResult {
            annual_rainfall,
            runoff_coefficient,
            collection_efficiency,
            storage_efficiency,
            overall_efficiency: compute_overall_efficiency(
                runoff_coefficient,
                collection_efficiency,
                storage_efficiency,
            ),
            harvestable_water,
            recommended_structure,
            installation_cost,
            annual_savings,
            payback_period,
            environmental_impact: compute_environmental_impact(harvestable_water),
            aquifer_type: classify_aquifer(profile.soil_type),
            water_table_depth,
            soil_type: profile.soil_type,
            infiltration_rate: infiltration_rate(profile.soil_type),
            potential_savings: compute_potential_savings(harvestable_water, profile.dwellers),
            water_balance: compute_water_balance(
                harvestable_water,
                annual_rainfall,
                profile.roof_area,
            ),
        };

        info!(
            "Recommended {} for '{}', payback {}",
            result.recommended_structure, profile.name, result.payback_period
        );
        Ok(result)
    }

    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }
}

fn ensure_usable(field: &'static str, value: f64) -> Result<(), RaincatchError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RaincatchError::MalformedInput { field, value })
    }
}
