use crate::{
    assessment::engine::{AssessmentEngine, Pricing},
    error::RaincatchError,
    site::SiteConditions,
};

/// A fluent builder for constructing an `AssessmentEngine`.
///
/// The site-conditions source is required; pricing falls back to the
/// default unit prices when not set.
#[derive(Default)]
pub struct AssessmentEngineBuilder {
    site: Option<Box<dyn SiteConditions>>,
    pricing: Option<Pricing>,
}

impl AssessmentEngineBuilder {
    /// Creates a new, empty `AssessmentEngineBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source of rainfall, runoff and water table figures.
    pub fn with_site_conditions<S: SiteConditions + 'static>(mut self, site: S) -> Self {
        self.site = Some(Box::new(site));
        self
    }

    /// Overrides the per-area installation cost and per-liter savings.
    pub fn with_pricing(mut self, pricing: Pricing) -> Self {
        self.pricing = Some(pricing);
        self
    }

    /// Consumes the builder and returns a configured `AssessmentEngine`.
    ///
    /// # Errors
    ///
    /// Returns `RaincatchError::SiteConditionsNotDefined` if no site source was provided.
    pub fn build(self) -> Result<AssessmentEngine, RaincatchError> {
        Ok(AssessmentEngine {
            site: self.site.ok_or(RaincatchError::SiteConditionsNotDefined)?,
            pricing: self.pricing.unwrap_or_default(),
        })
    }
}
