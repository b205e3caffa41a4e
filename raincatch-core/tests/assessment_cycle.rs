//! End-to-end checks of a submission: engine, session store and CSV ledger together.

use approx::assert_relative_eq;
use raincatch_core::{
    assessment::builder::AssessmentEngineBuilder,
    calculations::compute_financial_projection,
    collaborators::FeedbackSink,
    ledger::{CsvAssessmentLedger, CsvFeedbackLog},
    session::{state::SessionPhase, store::SessionStore},
    site::{FixedSiteConditions, RegionalRainfall, SeededSiteConditions},
};
use raincatch_schemas::{
    assessment::{AquiferType, PaybackPeriod, RecommendedStructure},
    feedback::Feedback,
    profile::{Coordinates, PropertyProfile, RoofType, SoilType},
};
use std::{fs, path::PathBuf};

fn scratch_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("raincatch-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = fs::remove_file(&path);
    path
}

fn demo_profile() -> PropertyProfile {
    PropertyProfile {
        name: "Rajesh Kumar".to_string(),
        location: "Mumbai, Maharashtra".to_string(),
        dwellers: 4,
        roof_area: 120.0,
        open_space: 30.0,
        roof_type: RoofType::Concrete,
        roof_age: 8,
        soil_type: SoilType::Loamy,
        coordinates: Some(Coordinates {
            latitude: 19.076,
            longitude: 72.8777,
        }),
    }
}

#[test]
fn mumbai_submission_uses_regional_rainfall() {
    let mut engine = AssessmentEngineBuilder::new()
        .with_site_conditions(RegionalRainfall::with_defaults(SeededSiteConditions::default()))
        .build()
        .unwrap();
    let mut store = SessionStore::new();

    store.submit(demo_profile(), &mut engine).unwrap();

    assert_eq!(store.phase(), SessionPhase::Done);
    let record = store.state().assessment.as_ref().unwrap();
    assert!(record.assessment_id.starts_with("RWH_"));

    let result = &record.result;
    assert_relative_eq!(result.annual_rainfall, 1200.0);
    assert_relative_eq!(result.collection_efficiency, 0.8);
    assert_relative_eq!(result.storage_efficiency, 0.9);
    assert_eq!(result.recommended_structure, RecommendedStructure::RechargeWell);
    assert_eq!(result.aquifer_type, AquiferType::SemiConfined);
    assert_relative_eq!(result.installation_cost, 63_000.0);
    assert!(result.harvestable_water <= 120.0 * 1200.0);
    assert!((10..=60).contains(&result.water_table_depth));
}

#[test]
fn sandy_and_clay_sites() {
    let mut engine = AssessmentEngineBuilder::new()
        .with_site_conditions(FixedSiteConditions::default())
        .build()
        .unwrap();

    let sandy = engine
        .run_assessment(&PropertyProfile {
            soil_type: SoilType::Sandy,
            ..demo_profile()
        })
        .unwrap();
    assert_eq!(sandy.recommended_structure, RecommendedStructure::PercolationPit);
    assert_eq!(sandy.aquifer_type, AquiferType::Unconfined);
    assert_relative_eq!(sandy.installation_cost, 120.0 * 150.0 + 35_000.0);

    let clay = engine
        .run_assessment(&PropertyProfile {
            soil_type: SoilType::Clay,
            ..demo_profile()
        })
        .unwrap();
    assert_eq!(clay.recommended_structure, RecommendedStructure::SurfaceStorageTank);
    assert_eq!(clay.aquifer_type, AquiferType::Confined);
}

#[test]
fn projection_from_a_result_crosses_zero_at_payback() {
    let mut engine = AssessmentEngineBuilder::new()
        .with_site_conditions(FixedSiteConditions::default())
        .build()
        .unwrap();
    let result = engine
        .run_assessment(&PropertyProfile {
            roof_area: 900.0,
            roof_type: RoofType::Metal,
            ..demo_profile()
        })
        .unwrap();

    let PaybackPeriod::Years(years) = result.payback_period else {
        panic!("expected a finite payback period");
    };
    let projection =
        compute_financial_projection(result.installation_cost, result.annual_savings, years + 1);
    assert_eq!(projection.len() as u32, years + 2);
    assert!(projection[0].cumulative_savings < 0.0);
    assert!(projection.last().unwrap().cumulative_savings >= 0.0);
}

#[test]
fn ledger_keeps_full_records() {
    let path = scratch_file("ledger.csv");
    let mut ledger = CsvAssessmentLedger::new(&path);
    let mut engine = AssessmentEngineBuilder::new()
        .with_site_conditions(FixedSiteConditions::default())
        .build()
        .unwrap();
    let mut store = SessionStore::new();

    store.submit(demo_profile(), &mut engine).unwrap();
    store.save(&mut ledger).unwrap();
    store
        .submit(
            PropertyProfile {
                name: "Second House".to_string(),
                ..demo_profile()
            },
            &mut engine,
        )
        .unwrap();
    store.save(&mut ledger).unwrap();

    let records = ledger.load_records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].profile, demo_profile());
    assert_eq!(records[1].profile.name, "Second House");
    assert_eq!(
        records[0].result,
        store.state().assessment.as_ref().unwrap().result
    );
}

#[test]
fn feedback_is_validated_before_it_is_logged() {
    let path = scratch_file("feedback.csv");
    let mut log = CsvFeedbackLog::new(&path);
    let mut store = SessionStore::new();

    let rejected = Feedback {
        rating: 9,
        comments: None,
    };
    assert!(store.send_feedback(&mut log, &rejected).is_err());
    assert!(store.state().error.is_some());
    assert!(!path.exists());

    let accepted = Feedback {
        rating: 4,
        comments: Some("Clear and quick".to_string()),
    };
    store.send_feedback(&mut log, &accepted).unwrap();
    log.submit_feedback(&accepted).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.starts_with("submitted_at,rating,comments"));
}
