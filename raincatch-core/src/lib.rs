//! Assessment engine and session state for rooftop rainwater harvesting.
//!
//! [`assessment::engine::AssessmentEngine`] turns a validated
//! [`PropertyProfile`](raincatch_schemas::profile::PropertyProfile) into an
//! [`AssessmentResult`](raincatch_schemas::assessment::AssessmentResult);
//! [`session::store::SessionStore`] drives one submission cycle and keeps
//! the state a front end renders from.

pub mod assessment;
pub mod calculations;
pub mod collaborators;
pub mod error;
pub mod format;
pub mod ledger;
pub mod session;
pub mod site;
pub mod validation;
