//! CSV-backed implementations of the persistence and feedback surfaces.

use crate::{
    collaborators::{AssessmentStore, FeedbackSink},
    error::RaincatchError,
};
use chrono::Utc;
use csv::{Writer, WriterBuilder};
use log::info;
use raincatch_schemas::{assessment::AssessmentRecord, feedback::Feedback};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub assessment_id: String,
    pub created_at: i64,
    pub name: String,
    pub location: String,
    pub recommended_structure: String,
    pub harvestable_water_l: f64,
    pub installation_cost: f64,
    pub annual_savings: f64,
    pub payback_years: Option<u32>,
    pub profile_json: String,
    pub result_json: String,
}

impl LedgerEntry {
    fn from_record(record: &AssessmentRecord) -> Result<Self, RaincatchError> {
        Ok(Self {
            assessment_id: record.assessment_id.clone(),
            created_at: record.created_at,
            name: record.profile.name.clone(),
            location: record.profile.location.clone(),
            recommended_structure: record.result.recommended_structure.to_string(),
            harvestable_water_l: record.result.harvestable_water,
            installation_cost: record.result.installation_cost,
            annual_savings: record.result.annual_savings,
            payback_years: record.result.payback_period.years(),
            profile_json: serde_json::to_string(&record.profile)?,
            result_json: serde_json::to_string(&record.result)?,
        })
    }

    /// Rebuilds the full record from the JSON columns.
    pub fn to_record(&self) -> Result<AssessmentRecord, RaincatchError> {
        Ok(AssessmentRecord {
            assessment_id: self.assessment_id.clone(),
            created_at: self.created_at,
            profile: serde_json::from_str(&self.profile_json)?,
            result: serde_json::from_str(&self.result_json)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct FeedbackEntry {
    submitted_at: String,
    rating: u8,
    comments: String,
}

/// Opens `path` for appending, writing the header row only when the file is new or empty.
fn append_writer(path: &Path) -> Result<Writer<fs::File>, RaincatchError> {
    let display = path.display().to_string();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RaincatchError::FileIO(display.clone(), e))?;
    }
    let needs_header = fs::metadata(path).map_or(true, |m| m.len() == 0);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| RaincatchError::FileIO(display, e))?;
    Ok(WriterBuilder::new().has_headers(needs_header).from_writer(file))
}

/// Appends one row per saved assessment to a CSV file.
pub struct CsvAssessmentLedger {
    path: PathBuf,
}

impl CsvAssessmentLedger {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads back every record saved so far.
    pub fn load_records(&self) -> Result<Vec<AssessmentRecord>, RaincatchError> {
        let display = self.path.display().to_string();
        let mut reader = csv::Reader::from_path(&self.path)
            .map_err(|e| RaincatchError::CsvError(display.clone(), e))?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let entry: LedgerEntry = row.map_err(|e| RaincatchError::CsvError(display.clone(), e))?;
            records.push(entry.to_record()?);
        }
        Ok(records)
    }
}

impl AssessmentStore for CsvAssessmentLedger {
    fn save_assessment(&mut self, record: &AssessmentRecord) -> Result<(), RaincatchError> {
        let display = self.path.display().to_string();
        let entry = LedgerEntry::from_record(record)?;
        let mut writer = append_writer(&self.path)?;
        writer
            .serialize(entry)
            .map_err(|e| RaincatchError::CsvError(display.clone(), e))?;
        writer
            .flush()
            .map_err(|e| RaincatchError::FileIO(display.clone(), e))?;
        info!("Saved assessment {} to '{}'", record.assessment_id, display);
        Ok(())
    }
}

/// Appends timestamped feedback rows to a CSV file.
pub struct CsvFeedbackLog {
    path: PathBuf,
}

impl CsvFeedbackLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl FeedbackSink for CsvFeedbackLog {
    fn submit_feedback(&mut self, feedback: &Feedback) -> Result<(), RaincatchError> {
        let display = self.path.display().to_string();
        let entry = FeedbackEntry {
            submitted_at: Utc::now().to_rfc3339(),
            rating: feedback.rating,
            comments: feedback.comments.clone().unwrap_or_default(),
        };
        let mut writer = append_writer(&self.path)?;
        writer
            .serialize(entry)
            .map_err(|e| RaincatchError::CsvError(display.clone(), e))?;
        writer
            .flush()
            .map_err(|e| RaincatchError::FileIO(display, e))?;
        Ok(())
    }
}
