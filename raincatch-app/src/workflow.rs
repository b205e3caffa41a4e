use crate::config::AppConfig;
use anyhow::{Context, Result};
use log::{info, warn};
use raincatch_core::{
    assessment::engine::AssessmentEngine,
    calculations::compute_financial_projection,
    collaborators::google_earth_link,
    format::{format_currency, format_months, format_number},
    ledger::{CsvAssessmentLedger, CsvFeedbackLog},
    session::store::SessionStore,
    site::find_region,
};
use raincatch_schemas::{
    assessment::{AssessmentRecord, ProjectionPoint},
    feedback::Feedback,
    profile::PropertyProfile,
    region::RegionalRainfallEntry,
};
use std::{fs, path::Path};

/// Options for a single assessment run.
pub struct AssessOptions<'a> {
    pub output_dir: &'a Path,
    pub projection_years: u32,
    /// Regional table used to describe the rainy season in the report.
    pub regions: &'a [RegionalRainfallEntry],
    pub json: bool,
}

/// Submits one profile through the session, saves it to the ledger and writes its artefacts.
pub fn run_single_assessment(
    profile: PropertyProfile,
    engine: &mut AssessmentEngine,
    config: &AppConfig,
    options: &AssessOptions,
) -> Result<AssessmentRecord> {
    if !options.json {
        println!("\n--- [Workflow] Assessing '{}' ---", profile.name);
    }

    let mut session = SessionStore::new();
    session.subscribe(|state| log::debug!("Session phase is now {:?}", state.phase()));

    session
        .submit(profile, engine)
        .context("Assessment could not be completed")?;

    let mut ledger = CsvAssessmentLedger::new(&config.ledger_path);
    session
        .save(&mut ledger)
        .with_context(|| format!("Failed to save to ledger {:?}", ledger.path()))?;

    let record = session
        .state()
        .assessment
        .clone()
        .context("Session finished without an assessment")?;

    let projection = compute_financial_projection(
        record.result.installation_cost,
        record.result.annual_savings,
        options.projection_years,
    );

    write_artefacts(options.output_dir, &record, &projection)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        let region = find_region(options.regions, &record.profile.location);
        print_summary_report(&record, &projection, region, &config.currency_symbol);
    }

    Ok(record)
}

/// Assesses every profile found in the directory. Invalid profiles are reported and skipped.
pub fn run_batch(
    profiles: Vec<PropertyProfile>,
    engine: &mut AssessmentEngine,
    config: &AppConfig,
) -> Result<()> {
    println!("\n--- [Workflow] Batch assessment of {} profiles ---", profiles.len());

    let mut session = SessionStore::new();
    let mut ledger = CsvAssessmentLedger::new(&config.ledger_path);
    let mut completed = 0;

    for profile in profiles {
        let name = profile.name.clone();
        if let Err(e) = session.submit(profile, engine) {
            warn!("Skipping '{}': {}", name, e);
            println!("  - {:<24} | skipped: {}", name, e);
            continue;
        }
        session.save(&mut ledger)?;

        if let Some(record) = &session.state().assessment {
            println!(
                "  - {:<24} | {:<20} | {:>10} L/yr | {:>10} | payback {}",
                name,
                record.result.recommended_structure.to_string(),
                format_number(record.result.harvestable_water, 1),
                format_currency(record.result.installation_cost, &config.currency_symbol),
                record.result.payback_period
            );
            completed += 1;
        }
    }

    println!("\n{} assessments saved to {:?}", completed, config.ledger_path);
    Ok(())
}

pub fn submit_feedback(feedback: Feedback, config: &AppConfig) -> Result<()> {
    let mut session = SessionStore::new();
    let mut sink = CsvFeedbackLog::new(&config.feedback_path);
    session
        .send_feedback(&mut sink, &feedback)
        .context("Failed to submit feedback. Please try again.")?;
    println!("Thank you for your feedback!");
    Ok(())
}

fn write_artefacts(dir: &Path, record: &AssessmentRecord, projection: &[ProjectionPoint]) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;

    let result_path = dir.join(format!("{}.json", record.assessment_id));
    fs::write(&result_path, serde_json::to_string_pretty(record)?)
        .with_context(|| format!("Failed to write {:?}", result_path))?;

    let projection_path = dir.join(format!("{}_projection.csv", record.assessment_id));
    let mut writer = csv::Writer::from_path(&projection_path)
        .with_context(|| format!("Failed to create {:?}", projection_path))?;
    for point in projection {
        writer.serialize(point)?;
    }
    writer.flush()?;

    info!("Artefacts written to {:?}", dir);
    Ok(())
}

fn print_summary_report(
    record: &AssessmentRecord,
    projection: &[ProjectionPoint],
    region: Option<&RegionalRainfallEntry>,
    currency: &str,
) {
    let profile = &record.profile;
    let result = &record.result;
    let impact = &result.environmental_impact;
    let balance = &result.water_balance;

    println!("\n\n--- [Assessment Summary: {}] ---", record.assessment_id);
    println!("========================================");
    println!("Property: {} ({})", profile.name, profile.location);
    println!(
        "  - Roof: {:.0} m² {} roof, {} years old | Dwellers: {} | Open space: {:.0} m²",
        profile.roof_area,
        profile.roof_type.label(),
        profile.roof_age,
        profile.dwellers,
        profile.open_space
    );
    if let Some(coords) = &profile.coordinates {
        println!("  - Measure the roof in Google Earth: {}", google_earth_link(coords));
    }
    println!("----------------------------------------");

    println!("\nWater Potential:");
    println!("  - Annual Rainfall:          {:.0} mm", result.annual_rainfall);
    if let Some(region) = region.filter(|r| !r.monsoon_months.is_empty()) {
        println!(
            "  - Monsoon Months:           {} ({})",
            format_months(&region.monsoon_months),
            region.region
        );
    }
    println!("  - Harvestable Water:        {:.0} KL/year", result.harvestable_water / 1000.0);
    println!("  - Usable by Household:      {:.0} KL/year", result.potential_savings / 1000.0);
    println!("  - Runoff Coefficient:       {:.2}", result.runoff_coefficient);
    println!("  - Collection Efficiency:    {:.0}%", result.collection_efficiency * 100.0);
    println!("  - Storage Efficiency:       {:.0}%", result.storage_efficiency * 100.0);
    println!("  - Overall Efficiency:       {:.0}%", result.overall_efficiency * 100.0);

    println!("\nWater Balance:");
    println!("  - Rain on Roof:             {} L", format_number(balance.total_rainfall, 1));
    println!("  - Harvestable:              {} L", format_number(balance.harvestable, 1));
    println!("  - Surface Runoff:           {} L", format_number(balance.surface_runoff, 1));
    println!("  - Evaporation & Loss:       {} L", format_number(balance.evaporation_and_loss, 1));

    println!("\nRecommendation:");
    println!("  - Structure:                {}", result.recommended_structure);
    println!("  - Soil / Infiltration:      {} / {:.0} mm/hr", result.soil_type, result.infiltration_rate);
    println!("  - Aquifer Type:             {}", result.aquifer_type);
    println!("  - Water Table Depth:        {} ft", result.water_table_depth);

    println!("\nCost & Benefit:");
    println!("  - Installation Cost:        {}", format_currency(result.installation_cost, currency));
    println!("  - Annual Savings:           {}", format_currency(result.annual_savings, currency));
    println!("  - Payback Period:           {}", result.payback_period);
    if let Some(last) = projection.last() {
        println!(
            "  - Cumulative after {} yrs:  {} {:.0}",
            last.year, currency, last.cumulative_savings
        );
    }

    println!("\nEnvironmental Impact (per year):");
    println!("  - Groundwater Recharge:     {:.0} KL", impact.groundwater_recharge / 1000.0);
    println!("  - CO₂ Reduction:            {:.2} kg", impact.co2_reduction);
    println!("  - Energy Savings:           {:.2} kWh", impact.energy_savings);

    println!("========================================");
}
