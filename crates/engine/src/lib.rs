//! Brand conflict research engine.
//!
//! Runs the whole pipeline for one request over pre-fetched search results:
//! Nice classification, curated cache seeding, conflict extraction, merge,
//! declared-competitor checks, precedent selection and risk scoring.
//!
//! The engine is synchronous and holds no mutable state, so the same
//! request, results and tables always give the same [`ResearchResult`].

pub mod merge;
pub mod precedents;

use brandcheck_extract::extract_all;
use brandcheck_model::{ResearchRequest, ResearchResult, SearchResultSet};
use brandcheck_reference::{ReferenceError, ReferenceTables};
use brandcheck_score::score_conflicts;
use thiserror::Error;

pub use merge::{competitor_conflict, merge_extracted, merge_known_competitors, seed_from_cache};
pub use precedents::{select_precedents, MAX_PRECEDENTS};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Brand name must not be empty")]
    EmptyBrandName,

    #[error(transparent)]
    Reference(#[from] ReferenceError),
}

/// Configuration for the research engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Declared competitors considered per request
    pub max_competitors: usize,
    /// Character-overlap share above which a competitor is HIGH risk
    pub competitor_overlap_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_competitors: 5,
            competitor_overlap_threshold: 0.7,
        }
    }
}

/// Conflict extraction and risk scoring over injected reference tables.
#[derive(Debug, Clone)]
pub struct ResearchEngine {
    tables: ReferenceTables,
    config: EngineConfig,
}

impl ResearchEngine {
    pub fn new(tables: ReferenceTables, config: EngineConfig) -> Self {
        Self { tables, config }
    }

    /// An engine over the compiled-in reference tables.
    pub fn builtin() -> Result<Self, EngineError> {
        Ok(Self::new(ReferenceTables::builtin()?, EngineConfig::default()))
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Research one brand.
    ///
    /// Each extractor reads its own group of `results`; empty groups are
    /// valid input. The only failure is an empty brand name.
    pub fn research(
        &self,
        request: &ResearchRequest,
        results: &SearchResultSet,
    ) -> Result<ResearchResult, EngineError> {
        let brand_name = request.brand_name.trim();
        if brand_name.is_empty() {
            return Err(EngineError::EmptyBrandName);
        }

        let nice = self.tables.classify(&request.category, &request.industry);
        let mut result = ResearchResult::new(request, nice);
        result.brand_name = brand_name.to_string();

        let cache_hit = seed_from_cache(&mut result, &self.tables);

        let extracted = extract_all(results, brand_name, &request.industry);
        let added = merge_extracted(&mut result, extracted);

        merge_known_competitors(&mut result, &request.known_competitors, &self.config);

        result.legal_precedents = select_precedents(
            &self.tables,
            &request.category,
            &request.industry,
            &request.jurisdictions,
        );

        result.risk_profile = score_conflicts(
            &result.trademark_conflicts,
            &result.company_conflicts,
            &result.common_law_conflicts,
        );

        tracing::info!(
            brand = %brand_name,
            cache_hit,
            extracted = added,
            conflicts = result.risk_profile.total_conflicts_found,
            score = result.risk_profile.overall_risk_score,
            precedents = result.legal_precedents.len(),
            "Research complete"
        );

        Ok(result)
    }
}
