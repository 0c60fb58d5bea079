//! Conflict extraction from raw search results.
//!
//! Three independent extractors, each over its own list of
//! [`SearchResult`]s:
//! - trademark filings
//! - company registrations
//! - common-law (unregistered) online presence
//!
//! Every extractor is a pure function. Results that fail the relevance gate
//! or have no usable name are skipped, never reported as errors.

pub mod patterns;

use brandcheck_features::{generate_variants, mentions_brand, normalize_name, truncate_chars};
use brandcheck_model::{
    CommonLawConflict, CompanyConflict, ConflictType, RiskLevel, SearchResult, SearchResultSet,
    TrademarkConflict,
};
use std::collections::HashSet;

use crate::patterns::{
    application_number, class_number, classify_company_status, classify_status, company_name,
    extract_name, filing_date, incorporation_date, industry_terms, owner, platform, region,
    registration_id, social_handle, source_label,
};

/// Maximum length of `details` and `snippet` fields.
pub const DETAILS_MAX_CHARS: usize = 200;

/// Entity-type keywords required by the company extractor.
const ENTITY_KEYWORDS: &[&str] = &[
    "private limited", "pvt ltd", "pvt. ltd", "limited", "ltd", "llp", "llc", "inc.",
    "incorporated", "corporation", "corp", "gmbh", "plc",
];

/// Business-activity keywords required by the common-law extractor.
const ACTIVITY_KEYWORDS: &[&str] = &[
    "shop", "store", "buy", "order", "sale", "collection", "official", "online", "followers",
    "instagram", "facebook", "amazon", "flipkart", "myntra", "meesho", "etsy", "@",
];

/// Registry and legal markers. Results carrying these are registry hits,
/// not common-law evidence.
const LEGAL_MARKERS: &[&str] = &["trademark", "ipindia", "wipo", "uspto", "court", "mca.gov"];

const INTERNATIONAL_MARKERS: &[&str] = &["wipo", "madrid", "international registration"];

/// Output of all three extractors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedConflicts {
    pub trademarks: Vec<TrademarkConflict>,
    pub companies: Vec<CompanyConflict>,
    pub common_law: Vec<CommonLawConflict>,
}

impl ExtractedConflicts {
    pub fn len(&self) -> usize {
        self.trademarks.len() + self.companies.len() + self.common_law.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run each extractor over its own group of `results`.
pub fn extract_all(results: &SearchResultSet, brand_name: &str, industry: &str) -> ExtractedConflicts {
    let extracted = ExtractedConflicts {
        trademarks: extract_trademark_conflicts(&results.trademark, brand_name),
        companies: extract_company_conflicts(&results.company, brand_name, industry),
        common_law: extract_common_law_conflicts(&results.common_law, brand_name, industry),
    };
    tracing::debug!(
        brand = %brand_name,
        results = results.len(),
        trademarks = extracted.trademarks.len(),
        companies = extracted.companies.len(),
        common_law = extracted.common_law.len(),
        "Extracted conflict candidates"
    );
    extracted
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Keeps the first conflict seen for each normalized name.
#[derive(Default)]
struct SeenNames(HashSet<String>);

impl SeenNames {
    fn first(&mut self, name: &str) -> bool {
        self.0.insert(normalize_name(name))
    }
}

/// Trademark filings mentioned in search results.
///
/// Risk follows the filing status: REGISTERED is HIGH, PENDING MEDIUM,
/// OBJECTED LOW, anything else MEDIUM.
pub fn extract_trademark_conflicts(results: &[SearchResult], brand_name: &str) -> Vec<TrademarkConflict> {
    let variants = generate_variants(brand_name);
    let mut seen = SeenNames::default();
    let mut conflicts = Vec::new();

    for result in results {
        let text = format!("{} {}", result.title, result.snippet);
        let lower = text.to_lowercase();
        let url_lower = result.url.to_lowercase();

        if !mentions_brand(&text, brand_name, &variants) {
            continue;
        }
        let Some(name) = extract_name(result, brand_name) else {
            continue;
        };
        if !seen.first(&name) {
            continue;
        }

        let conflict_type = if contains_any(&lower, INTERNATIONAL_MARKERS) || url_lower.contains("wipo") {
            ConflictType::International
        } else {
            ConflictType::Filing
        };
        let status = classify_status(&lower);

        conflicts.push(TrademarkConflict {
            conflict_type,
            application_number: application_number(&text),
            owner: owner(&text),
            class_number: class_number(&text),
            filing_date: filing_date(&text),
            details: truncate_chars(result.snippet.trim(), DETAILS_MAX_CHARS),
            url: result.url.clone(),
            ..TrademarkConflict::new(name, source_label(&result.url), status)
        });
    }

    conflicts
}

/// Registered companies with names resembling the brand.
///
/// A company whose name contains the brand outright is HIGH risk; any other
/// match is MEDIUM.
pub fn extract_company_conflicts(
    results: &[SearchResult],
    brand_name: &str,
    industry: &str,
) -> Vec<CompanyConflict> {
    let variants = generate_variants(brand_name);
    let terms = industry_terms(industry);
    let mut seen = SeenNames::default();
    let mut conflicts = Vec::new();

    for result in results {
        let text = format!("{} {}", result.title, result.snippet);
        let lower = text.to_lowercase();

        if !mentions_brand(&text, brand_name, &variants) || !contains_any(&lower, ENTITY_KEYWORDS) {
            continue;
        }
        let Some(name) = company_name(&result.title)
            .or_else(|| company_name(&result.snippet))
            .or_else(|| extract_name(result, brand_name))
        else {
            continue;
        };
        if !seen.first(&name) {
            continue;
        }

        let industry_match = terms.iter().any(|t| lower.contains(t.as_str()));
        let conflict = CompanyConflict::new(name, source_label(&result.url), brand_name);
        let mut notes = Vec::new();
        if conflict.risk_level == RiskLevel::High {
            notes.push(format!("Company name contains the brand name '{}'", brand_name.trim()));
        }
        if industry_match {
            notes.push(format!("Operates in the same industry ({})", industry.trim()));
        }

        conflicts.push(CompanyConflict {
            registration_id: registration_id(&text),
            status: classify_company_status(&lower),
            incorporation_date: incorporation_date(&text),
            industry: industry_match.then(|| industry.trim().to_string()),
            region: region(&lower),
            overlap_analysis: (!notes.is_empty()).then(|| notes.join("; ")),
            url: result.url.clone(),
            ..conflict
        });
    }

    conflicts
}

/// Unregistered but operating brand presences: shops, listings, handles.
///
/// Registry and court results are excluded so they are not counted twice.
/// Risk is MEDIUM when the snippet names the industry, LOW otherwise.
pub fn extract_common_law_conflicts(
    results: &[SearchResult],
    brand_name: &str,
    industry: &str,
) -> Vec<CommonLawConflict> {
    let variants = generate_variants(brand_name);
    let terms = industry_terms(industry);
    let mut seen = SeenNames::default();
    let mut conflicts = Vec::new();

    for result in results {
        let text = format!("{} {}", result.title, result.snippet);
        let lower = text.to_lowercase();

        if contains_any(&result.url.to_lowercase(), LEGAL_MARKERS) || contains_any(&lower, LEGAL_MARKERS) {
            continue;
        }
        if !mentions_brand(&text, brand_name, &variants) || !contains_any(&lower, ACTIVITY_KEYWORDS) {
            continue;
        }
        let Some(name) = social_handle(result).or_else(|| extract_name(result, brand_name)) else {
            continue;
        };
        if !seen.first(&name) {
            continue;
        }

        let snippet_lower = result.snippet.to_lowercase();
        let industry_match = terms.iter().any(|t| snippet_lower.contains(t.as_str()));

        conflicts.push(CommonLawConflict {
            url: result.url.clone(),
            snippet: truncate_chars(result.snippet.trim(), DETAILS_MAX_CHARS),
            ..CommonLawConflict::new(name, platform(result), industry_match)
        });
    }

    conflicts
}
