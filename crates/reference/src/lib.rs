//! Static reference tables.
//!
//! Holds the Nice-classification keyword map, the jurisdiction alias rules,
//! the per-jurisdiction precedent bank and the curated cache of verified
//! conflicts. Tables are loaded once into an immutable [`ReferenceTables`]
//! value and passed to the engine; nothing here is global.

use brandcheck_features::normalize_name;
use brandcheck_model::{
    CommonLawConflict, CompanyConflict, CompanyStatus, LegalPrecedent, NiceClassification,
    TrademarkConflict, TrademarkStatus,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Jurisdiction used when the requested one has no precedent entry.
pub const DEFAULT_JURISDICTION: &str = "USA";

/// Nice class used when no keyword matches.
pub const FALLBACK_NICE_CLASS: u8 = 35;
pub const FALLBACK_NICE_DESCRIPTION: &str = "Advertising, business management, office functions";
pub const FALLBACK_MATCHED_TERM: &str = "general business";

const BUILTIN_TABLES: &str = include_str!("../data/reference.json");

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Failed to read reference tables: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid reference tables: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid Nice class {0} (expected 1-45)")]
    InvalidClass(u8),

    #[error("Precedent bank has no entry for default jurisdiction {0}")]
    MissingDefaultJurisdiction(&'static str),
}

/// One Nice class and the category keywords that select it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NiceClassEntry {
    pub class_number: u8,
    pub description: String,
    pub keywords: Vec<String>,
}

/// Maps a free-text jurisdiction onto a precedent bank key.
///
/// Rules are evaluated top to bottom. `exact` rules only fire on the whole
/// (lowercased) input, which keeps two-letter codes like "us" from matching
/// inside "russia".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasRule {
    pub pattern: String,
    pub key: String,
    #[serde(default)]
    pub exact: bool,
}

impl AliasRule {
    fn matches(&self, input: &str) -> bool {
        if self.exact {
            input == self.pattern
        } else {
            input.contains(&self.pattern)
        }
    }
}

/// Precedents for one jurisdiction, grouped by topic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrecedentGroups {
    #[serde(default)]
    pub phonetic_similarity: Vec<LegalPrecedent>,
    #[serde(default)]
    pub fashion: Vec<LegalPrecedent>,
    #[serde(default)]
    pub general: Vec<LegalPrecedent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedTrademark {
    name: String,
    source: String,
    #[serde(default)]
    status: Option<TrademarkStatus>,
    #[serde(default)]
    application_number: Option<String>,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    class_number: Option<u8>,
    #[serde(default)]
    filing_date: Option<String>,
    #[serde(default)]
    details: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedCompany {
    name: String,
    source: String,
    #[serde(default)]
    registration_id: Option<String>,
    #[serde(default)]
    status: CompanyStatus,
    #[serde(default)]
    incorporation_date: Option<String>,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedCommonLaw {
    name: String,
    platform: String,
    #[serde(default)]
    industry_match: bool,
    #[serde(default)]
    url: String,
    #[serde(default)]
    snippet: String,
}

/// Previously verified records for one brand.
///
/// Risk levels are not stored; they are derived on lookup with the same
/// rules the extractors use.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedBrand {
    brand: String,
    #[serde(default)]
    trademarks: Vec<CachedTrademark>,
    #[serde(default)]
    companies: Vec<CachedCompany>,
    #[serde(default)]
    common_law: Vec<CachedCommonLaw>,
}

/// Conflicts served from the curated cache for one brand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedConflicts {
    pub trademarks: Vec<TrademarkConflict>,
    pub companies: Vec<CompanyConflict>,
    pub common_law: Vec<CommonLawConflict>,
}

/// All static lookup data used by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub version: String,
    nice_classes: Vec<NiceClassEntry>,
    fashion_keywords: Vec<String>,
    jurisdiction_aliases: Vec<AliasRule>,
    precedents: BTreeMap<String, PrecedentGroups>,
    #[serde(default)]
    cached_conflicts: Vec<CachedBrand>,
}

impl ReferenceTables {
    /// The tables compiled into this crate.
    pub fn builtin() -> Result<Self, ReferenceError> {
        Self::from_json_str(BUILTIN_TABLES)
    }

    /// Load tables from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ReferenceError> {
        let tables: Self = serde_json::from_str(raw)?;
        tables.validate()?;
        tracing::debug!(
            version = %tables.version,
            nice_classes = tables.nice_classes.len(),
            jurisdictions = tables.precedents.len(),
            cached_brands = tables.cached_conflicts.len(),
            "Loaded reference tables"
        );
        Ok(tables)
    }

    fn validate(&self) -> Result<(), ReferenceError> {
        if let Some(entry) = self
            .nice_classes
            .iter()
            .find(|e| !(1..=45).contains(&e.class_number))
        {
            return Err(ReferenceError::InvalidClass(entry.class_number));
        }
        if !self.precedents.contains_key(DEFAULT_JURISDICTION) {
            return Err(ReferenceError::MissingDefaultJurisdiction(DEFAULT_JURISDICTION));
        }
        Ok(())
    }

    /// Pick the Nice class for a category, trying the category text before
    /// the industry text. Keywords match whole words in declared order.
    pub fn classify(&self, category: &str, industry: &str) -> NiceClassification {
        [category, industry]
            .iter()
            .find_map(|text| self.match_nice_class(text))
            .unwrap_or_else(|| NiceClassification {
                class_number: FALLBACK_NICE_CLASS,
                description: FALLBACK_NICE_DESCRIPTION.to_string(),
                matched_term: FALLBACK_MATCHED_TERM.to_string(),
            })
    }

    fn match_nice_class(&self, text: &str) -> Option<NiceClassification> {
        let padded = format!(" {} ", word_tokens(text));
        self.nice_classes.iter().find_map(|entry| {
            entry
                .keywords
                .iter()
                .find(|kw| padded.contains(&format!(" {} ", word_tokens(kw))))
                .map(|kw| NiceClassification {
                    class_number: entry.class_number,
                    description: entry.description.clone(),
                    matched_term: kw.clone(),
                })
        })
    }

    /// Map a jurisdiction name onto a precedent bank key.
    ///
    /// Bank keys match case-insensitively first, then alias rules in order.
    /// Returns `None` for jurisdictions the bank does not cover.
    pub fn resolve_jurisdiction(&self, jurisdiction: &str) -> Option<&str> {
        let input = normalize_name(jurisdiction);
        if input.is_empty() {
            return None;
        }

        if let Some(key) = self.precedents.keys().find(|k| k.to_lowercase() == input) {
            return Some(key.as_str());
        }

        self.jurisdiction_aliases
            .iter()
            .find(|rule| rule.matches(&input))
            .and_then(|rule| self.precedents.get_key_value(rule.key.as_str()))
            .map(|(key, _)| key.as_str())
    }

    pub fn precedent_groups(&self, key: &str) -> Option<&PrecedentGroups> {
        self.precedents.get(key)
    }

    /// Precedents for the fallback jurisdiction. Present by validation.
    pub fn default_precedent_groups(&self) -> (&str, &PrecedentGroups) {
        match self.precedents.get_key_value(DEFAULT_JURISDICTION) {
            Some((key, groups)) => (key.as_str(), groups),
            None => unreachable!("validated on load"),
        }
    }

    pub fn jurisdictions(&self) -> impl Iterator<Item = &str> {
        self.precedents.keys().map(String::as_str)
    }

    /// Does the category text contain a fashion/apparel keyword?
    pub fn is_fashion_category(&self, category: &str) -> bool {
        let category = category.to_lowercase();
        self.fashion_keywords
            .iter()
            .any(|kw| category.contains(kw.as_str()))
    }

    /// Verified conflicts for a brand: an exact cache key match wins,
    /// otherwise the first key that contains, or is contained in, the
    /// normalized brand name.
    pub fn cached_conflicts(&self, brand_name: &str) -> Option<CachedConflicts> {
        let brand = normalize_name(brand_name);
        if brand.is_empty() {
            return None;
        }

        let entry = self
            .cached_conflicts
            .iter()
            .find(|c| normalize_name(&c.brand) == brand)
            .or_else(|| {
                self.cached_conflicts.iter().find(|c| {
                    let key = normalize_name(&c.brand);
                    !key.is_empty() && (brand.contains(&key) || key.contains(&brand))
                })
            })?;

        tracing::debug!(brand = %brand_name, cache_key = %entry.brand, "Curated cache hit");
        Some(entry.to_conflicts(brand_name))
    }
}

impl CachedBrand {
    fn to_conflicts(&self, brand_name: &str) -> CachedConflicts {
        let trademarks = self
            .trademarks
            .iter()
            .map(|t| TrademarkConflict {
                application_number: t.application_number.clone(),
                owner: t.owner.clone(),
                class_number: t.class_number,
                filing_date: t.filing_date.clone(),
                details: t.details.clone(),
                url: t.url.clone(),
                ..TrademarkConflict::new(t.name.clone(), t.source.clone(), t.status)
            })
            .collect();

        let companies = self
            .companies
            .iter()
            .map(|c| CompanyConflict {
                registration_id: c.registration_id.clone(),
                status: c.status,
                incorporation_date: c.incorporation_date.clone(),
                industry: c.industry.clone(),
                region: c.region.clone(),
                url: c.url.clone(),
                ..CompanyConflict::new(c.name.clone(), c.source.clone(), brand_name)
            })
            .collect();

        let common_law = self
            .common_law
            .iter()
            .map(|c| CommonLawConflict {
                url: c.url.clone(),
                snippet: c.snippet.clone(),
                ..CommonLawConflict::new(c.name.clone(), c.platform.clone(), c.industry_match)
            })
            .collect();

        CachedConflicts {
            trademarks,
            companies,
            common_law,
        }
    }
}

/// Lowercase alphanumeric words joined by single spaces.
fn word_tokens(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandcheck_model::RiskLevel;

    fn tables() -> ReferenceTables {
        ReferenceTables::builtin().unwrap()
    }

    #[test]
    fn test_builtin_tables_load() {
        let tables = tables();
        let keys: Vec<_> = tables.jurisdictions().collect();
        assert!(keys.contains(&"India"));
        assert!(keys.contains(&DEFAULT_JURISDICTION));
    }

    #[test]
    fn test_classify_category() {
        let tables = tables();
        assert_eq!(tables.classify("Streetwear", "Fashion").class_number, 25);
        assert_eq!(tables.classify("SaaS", "Technology").class_number, 42);
        // "app" must not fire inside "apparel"
        assert_eq!(tables.classify("Apparel", "General").matched_term, "apparel");
        assert_eq!(tables.classify("General", "Coffee").class_number, 30);
    }

    #[test]
    fn test_classify_fallback() {
        let nice = tables().classify("General", "General");
        assert_eq!(nice.class_number, FALLBACK_NICE_CLASS);
        assert_eq!(nice.description, FALLBACK_NICE_DESCRIPTION);
        assert_eq!(nice.matched_term, FALLBACK_MATCHED_TERM);
    }

    #[test]
    fn test_resolve_jurisdiction_aliases() {
        let tables = tables();
        assert_eq!(tables.resolve_jurisdiction("United States"), Some("USA"));
        assert_eq!(tables.resolve_jurisdiction("usa"), Some("USA"));
        assert_eq!(tables.resolve_jurisdiction("Great Britain"), Some("UK"));
        assert_eq!(tables.resolve_jurisdiction("Northern Ireland"), Some("UK"));
        assert_eq!(tables.resolve_jurisdiction("Germany"), Some("EU"));
        assert_eq!(tables.resolve_jurisdiction("india"), Some("India"));
        assert_eq!(tables.resolve_jurisdiction("Russia"), None);
        assert_eq!(tables.resolve_jurisdiction("Atlantis"), None);
        assert_eq!(tables.resolve_jurisdiction(""), None);
    }

    #[test]
    fn test_fashion_category() {
        let tables = tables();
        assert!(tables.is_fashion_category("Streetwear"));
        assert!(tables.is_fashion_category("Luxury Handbags"));
        assert!(!tables.is_fashion_category("SaaS"));
    }

    #[test]
    fn test_cached_conflicts_exact_and_substring() {
        let tables = tables();
        let exact = tables.cached_conflicts("Luminara").unwrap();
        assert_eq!(exact.trademarks.len(), 2);
        assert_eq!(exact.trademarks[0].risk_level, RiskLevel::High);
        assert_eq!(exact.trademarks[1].risk_level, RiskLevel::Medium);
        assert_eq!(exact.companies[0].risk_level, RiskLevel::High);
        assert_eq!(exact.common_law[0].risk_level, RiskLevel::Medium);

        let partial = tables.cached_conflicts("Luminara Threads").unwrap();
        assert_eq!(partial.trademarks.len(), 2);

        assert!(tables.cached_conflicts("Zyxqplorbex").is_none());
        assert!(tables.cached_conflicts("").is_none());
    }

    #[test]
    fn test_missing_default_jurisdiction_rejected() {
        let raw = r#"{
            "version": "test",
            "nice_classes": [],
            "fashion_keywords": [],
            "jurisdiction_aliases": [],
            "precedents": {"India": {}}
        }"#;
        assert!(matches!(
            ReferenceTables::from_json_str(raw),
            Err(ReferenceError::MissingDefaultJurisdiction(_))
        ));
    }

    #[test]
    fn test_invalid_class_rejected() {
        let raw = r#"{
            "version": "test",
            "nice_classes": [{"class_number": 46, "description": "x", "keywords": []}],
            "fashion_keywords": [],
            "jurisdiction_aliases": [],
            "precedents": {"USA": {}}
        }"#;
        assert!(matches!(
            ReferenceTables::from_json_str(raw),
            Err(ReferenceError::InvalidClass(46))
        ));
    }
}
