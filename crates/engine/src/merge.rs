//! Merging conflicts from the curated cache, the extractors and the
//! caller's declared competitors into one result.
//!
//! Conflicts are keyed by normalized name within each list; a name that is
//! already present is never added again, so merging is idempotent.

use brandcheck_extract::ExtractedConflicts;
use brandcheck_features::{char_overlap_ratio, normalize_name};
use brandcheck_model::{CompanyConflict, ResearchResult, RiskLevel};
use brandcheck_reference::ReferenceTables;

use crate::EngineConfig;

pub const COMPETITOR_SOURCE: &str = "User-declared competitor";

pub const DIRECT_OVERLAP_RATIONALE: &str =
    "Direct name overlap with a declared competitor: one name contains the other.";

fn merge_unique<T>(target: &mut Vec<T>, incoming: Vec<T>, name: impl Fn(&T) -> &str) -> usize {
    let before = target.len();
    for item in incoming {
        let key = normalize_name(name(&item));
        if key.is_empty() || target.iter().any(|existing| normalize_name(name(existing)) == key) {
            continue;
        }
        target.push(item);
    }
    target.len() - before
}

/// Add conflicts, skipping names already present. Returns how many were added.
pub fn merge_extracted(result: &mut ResearchResult, extracted: ExtractedConflicts) -> usize {
    merge_unique(&mut result.trademark_conflicts, extracted.trademarks, |c| c.name.as_str())
        + merge_unique(&mut result.company_conflicts, extracted.companies, |c| c.name.as_str())
        + merge_unique(&mut result.common_law_conflicts, extracted.common_law, |c| c.name.as_str())
}

/// Pre-populate `result` from the curated cache. Returns whether the cache
/// had an entry for the brand.
pub fn seed_from_cache(result: &mut ResearchResult, tables: &ReferenceTables) -> bool {
    let Some(cached) = tables.cached_conflicts(&result.brand_name) else {
        return false;
    };
    merge_extracted(
        result,
        ExtractedConflicts {
            trademarks: cached.trademarks,
            companies: cached.companies,
            common_law: cached.common_law,
        },
    );
    true
}

/// Compare the brand against one declared competitor.
///
/// Containment either way is CRITICAL. Otherwise the share of the brand's
/// length covered by shared characters must exceed the configured threshold
/// for a HIGH conflict. This is a coarse heuristic, not a phonetic or
/// edit-distance comparison.
pub fn competitor_conflict(
    brand_name: &str,
    competitor: &str,
    config: &EngineConfig,
) -> Option<CompanyConflict> {
    let brand = normalize_name(brand_name);
    let other = normalize_name(competitor);
    if brand.is_empty() || other.is_empty() {
        return None;
    }

    let (risk_level, rationale) = if brand.contains(&other) || other.contains(&brand) {
        (RiskLevel::Critical, DIRECT_OVERLAP_RATIONALE.to_string())
    } else {
        let ratio = char_overlap_ratio(&brand, &other);
        if ratio <= config.competitor_overlap_threshold {
            return None;
        }
        (
            RiskLevel::High,
            format!(
                "Shares {:.0}% of the brand's characters with a declared competitor (coarse character-set heuristic).",
                ratio * 100.0
            ),
        )
    };

    Some(CompanyConflict {
        risk_level,
        overlap_analysis: Some(rationale),
        ..CompanyConflict::new(competitor.trim(), COMPETITOR_SOURCE, brand_name)
    })
}

/// Fold the caller's known competitors (first `max_competitors` non-empty
/// names) into the company conflicts.
///
/// A competitor already listed under the same name has its risk raised,
/// never lowered, instead of being duplicated.
pub fn merge_known_competitors(
    result: &mut ResearchResult,
    competitors: &[String],
    config: &EngineConfig,
) -> usize {
    let brand_name = result.brand_name.clone();
    let mut flagged = 0;

    for competitor in competitors
        .iter()
        .filter(|c| !c.trim().is_empty())
        .take(config.max_competitors)
    {
        let Some(conflict) = competitor_conflict(&brand_name, competitor, config) else {
            continue;
        };
        flagged += 1;

        let key = normalize_name(&conflict.name);
        match result
            .company_conflicts
            .iter_mut()
            .find(|existing| normalize_name(&existing.name) == key)
        {
            Some(existing) => {
                if conflict.risk_level > existing.risk_level {
                    existing.risk_level = conflict.risk_level;
                    existing.overlap_analysis = conflict.overlap_analysis;
                }
            }
            None => result.company_conflicts.push(conflict),
        }
    }

    if flagged > 0 {
        tracing::debug!(brand = %brand_name, flagged, "Declared competitors flagged");
    }
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandcheck_model::{
        CommonLawConflict, NiceClassification, ResearchRequest, TrademarkConflict, TrademarkStatus,
    };

    fn empty_result(brand: &str) -> ResearchResult {
        let nice = NiceClassification {
            class_number: 35,
            description: "test".to_string(),
            matched_term: "test".to_string(),
        };
        ResearchResult::new(&ResearchRequest::new(brand), nice)
    }

    fn extracted() -> ExtractedConflicts {
        ExtractedConflicts {
            trademarks: vec![
                TrademarkConflict::new("LUMINARA", "IP India", Some(TrademarkStatus::Registered)),
                TrademarkConflict::new("Lumynara", "Web Search", None),
            ],
            companies: vec![CompanyConflict::new("Luminara Foods LLP", "MCA", "Luminara")],
            common_law: vec![CommonLawConflict::new("@luminara", "Instagram", false)],
        }
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut result = empty_result("Luminara");
        assert_eq!(merge_extracted(&mut result, extracted()), 4);
        assert_eq!(merge_extracted(&mut result, extracted()), 0);
        assert_eq!(result.total_conflicts(), 4);
    }

    #[test]
    fn test_merge_skips_case_variants() {
        let mut result = empty_result("Luminara");
        merge_extracted(&mut result, extracted());
        let again = ExtractedConflicts {
            trademarks: vec![TrademarkConflict::new("luminara", "Web Search", None)],
            ..Default::default()
        };
        assert_eq!(merge_extracted(&mut result, again), 0);
        assert_eq!(result.trademark_conflicts[0].source, "IP India");
    }

    #[test]
    fn test_substring_competitor_is_critical() {
        let config = EngineConfig::default();
        let conflict = competitor_conflict("PayQuick", "PayQuickly", &config).unwrap();
        assert_eq!(conflict.risk_level, RiskLevel::Critical);
        assert_eq!(conflict.name, "PayQuickly");
        assert_eq!(conflict.overlap_analysis.as_deref(), Some(DIRECT_OVERLAP_RATIONALE));
    }

    #[test]
    fn test_overlap_competitor_is_high() {
        let config = EngineConfig::default();
        // Every letter of "zomato" appears in "tomazo".
        let conflict = competitor_conflict("Zomato", "Tomazo", &config).unwrap();
        assert_eq!(conflict.risk_level, RiskLevel::High);
        assert!(competitor_conflict("Zomato", "Swiggy", &config).is_none());
    }

    #[test]
    fn test_competitors_capped_and_upgraded() {
        let config = EngineConfig::default();
        let mut result = empty_result("PayQuick");
        result
            .company_conflicts
            .push(CompanyConflict::new("PayQuickly", "MCA", "PayQuick"));

        let competitors: Vec<String> = ["PayQuickly", "", "Quick", "PayQ", "Pay", "Paytm", "QuickPay", "PayQuick Pro"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        merge_known_competitors(&mut result, &competitors, &config);

        // Only the first five non-empty names are considered.
        assert!(!result.company_conflicts.iter().any(|c| c.name == "QuickPay"));
        assert!(!result.company_conflicts.iter().any(|c| c.name == "PayQuick Pro"));
        let existing: Vec<_> = result
            .company_conflicts
            .iter()
            .filter(|c| c.name == "PayQuickly")
            .collect();
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].risk_level, RiskLevel::Critical);
    }
}
