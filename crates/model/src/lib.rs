//! Core domain model for brandcheck conflict research.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `SearchResult`: A raw web-search record at the ingestion boundary
//! - `TrademarkConflict`, `CompanyConflict`, `CommonLawConflict`: Typed conflicts
//! - `LegalPrecedent`, `NiceClassification`: Reference data records
//! - `RiskProfile`: The scorer's numeric summary
//! - `ResearchRequest` / `ResearchResult`: One research run, in and out

use serde::{Deserialize, Deserializer, Serialize};

/// Severity assigned to a discovered conflict.
///
/// Declared in ascending order so that `Ord` compares by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Risk implied by a trademark filing's status.
    pub fn for_trademark_status(status: Option<TrademarkStatus>) -> Self {
        match status {
            Some(TrademarkStatus::Registered) => Self::High,
            Some(TrademarkStatus::Pending) => Self::Medium,
            Some(TrademarkStatus::Objected) => Self::Low,
            _ => Self::Medium,
        }
    }

    /// Risk implied by a company name: containing the brand outright is HIGH.
    pub fn for_company(brand_name: &str, company_name: &str) -> Self {
        let brand = brand_name.trim().to_lowercase();
        if !brand.is_empty() && company_name.to_lowercase().contains(&brand) {
            Self::High
        } else {
            Self::Medium
        }
    }

    /// Risk implied by unregistered usage. Never above MEDIUM.
    pub fn for_common_law(industry_match: bool) -> Self {
        if industry_match {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Status of a trademark filing as read from search text or the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrademarkStatus {
    Registered,
    Pending,
    Objected,
    Opposed,
    Abandoned,
}

impl TrademarkStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Registered => "REGISTERED",
            Self::Pending => "PENDING",
            Self::Objected => "OBJECTED",
            Self::Opposed => "OPPOSED",
            Self::Abandoned => "ABANDONED",
        }
    }
}

/// Where a trademark conflict comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    #[default]
    Filing,
    RegisteredCompany,
    CommonLaw,
    International,
}

impl ConflictType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Filing => "Filing",
            Self::RegisteredCompany => "Registered Company",
            Self::CommonLaw => "Common Law",
            Self::International => "International",
        }
    }
}

/// Registration status of a company.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompanyStatus {
    Active,
    Inactive,
    Dissolved,
    #[default]
    Unknown,
}

impl From<&str> for CompanyStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Self::Active,
            "INACTIVE" | "DORMANT" => Self::Inactive,
            "DISSOLVED" | "STRUCK OFF" | "STRIKE OFF" => Self::Dissolved,
            _ => Self::Unknown,
        }
    }
}

impl CompanyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Dissolved => "DISSOLVED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single raw record from the web-search layer.
///
/// Upstream providers disagree on field names (`body` vs `snippet`,
/// `href` vs `url`) and sometimes omit or null them; every field
/// collapses to an empty string rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(default, alias = "body", deserialize_with = "null_as_empty")]
    pub snippet: String,

    #[serde(default, alias = "href", deserialize_with = "null_as_empty")]
    pub url: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            url: url.into(),
        }
    }

    /// Title and snippet joined, lowercased, for keyword scans.
    pub fn combined_lower(&self) -> String {
        format!("{} {}", self.title, self.snippet).to_lowercase()
    }
}

/// Search results grouped by the kind of query that produced them.
///
/// Each extractor only sees its own group: registry queries feed the
/// trademark extractor, company-register queries the company extractor and
/// web/social queries the common-law extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultSet {
    #[serde(default)]
    pub trademark: Vec<SearchResult>,

    #[serde(default)]
    pub company: Vec<SearchResult>,

    #[serde(default)]
    pub common_law: Vec<SearchResult>,
}

impl SearchResultSet {
    pub fn new(
        trademark: Vec<SearchResult>,
        company: Vec<SearchResult>,
        common_law: Vec<SearchResult>,
    ) -> Self {
        Self {
            trademark,
            company,
            common_law,
        }
    }

    pub fn len(&self) -> usize {
        self.trademark.len() + self.company.len() + self.common_law.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A trademark filing or registration that resembles the brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrademarkConflict {
    /// The conflicting mark
    pub name: String,

    /// Provenance label (registry or "Web Search")
    pub source: String,

    #[serde(default)]
    pub conflict_type: ConflictType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TrademarkStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Nice class, 1-45
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_number: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<String>,

    /// Derived from `status`
    pub risk_level: RiskLevel,

    #[serde(default)]
    pub details: String,

    #[serde(default)]
    pub url: String,
}

impl TrademarkConflict {
    /// Create a filing conflict whose risk follows from `status`.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        status: Option<TrademarkStatus>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            conflict_type: ConflictType::Filing,
            application_number: None,
            status,
            owner: None,
            class_number: None,
            filing_date: None,
            risk_level: RiskLevel::for_trademark_status(status),
            details: String::new(),
            url: String::new(),
        }
    }
}

/// A registered business entity with a similar name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyConflict {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<String>,

    #[serde(default)]
    pub status: CompanyStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incorporation_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    /// State or region of registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    pub source: String,

    pub risk_level: RiskLevel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap_analysis: Option<String>,

    #[serde(default)]
    pub url: String,
}

impl CompanyConflict {
    /// Create a company conflict with risk derived against `brand_name`.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        brand_name: &str,
    ) -> Self {
        let name = name.into();
        let risk_level = RiskLevel::for_company(brand_name, &name);
        Self {
            name,
            registration_id: None,
            status: CompanyStatus::Unknown,
            incorporation_date: None,
            industry: None,
            region: None,
            source: source.into(),
            risk_level,
            overlap_analysis: None,
            url: String::new(),
        }
    }
}

/// An operating but unregistered brand presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonLawConflict {
    pub name: String,

    /// Website, Instagram, Facebook, Amazon, ...
    pub platform: String,

    pub industry_match: bool,

    /// LOW or MEDIUM only
    pub risk_level: RiskLevel,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub snippet: String,
}

impl CommonLawConflict {
    pub fn new(name: impl Into<String>, platform: impl Into<String>, industry_match: bool) -> Self {
        Self {
            name: name.into(),
            platform: platform.into(),
            industry_match,
            risk_level: RiskLevel::for_common_law(industry_match),
            url: String::new(),
            snippet: String::new(),
        }
    }
}

/// A legal citation used as supporting rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalPrecedent {
    pub case_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,

    /// Four-digit year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    pub relevance: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_principle: Option<String>,

    #[serde(default)]
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Nice classification chosen for the brand's category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NiceClassification {
    pub class_number: u8,
    pub description: String,
    /// The keyword that selected this class
    pub matched_term: String,
}

/// Numeric risk summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// 1-10
    pub overall_risk_score: u8,
    /// 0-100
    pub registration_success_probability: u8,
    /// 0-100
    pub opposition_probability: u8,
    pub critical_conflicts_count: usize,
    pub high_risk_conflicts_count: usize,
    pub total_conflicts_found: usize,
}

impl RiskProfile {
    /// Coarse band for the overall score.
    pub fn band(&self) -> &'static str {
        match self.overall_risk_score {
            0..=3 => "LOW",
            4..=6 => "MODERATE",
            7..=8 => "HIGH",
            _ => "CRITICAL",
        }
    }
}

/// Parameters for one research run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub brand_name: String,

    #[serde(default = "default_general")]
    pub industry: String,

    #[serde(default = "default_general")]
    pub category: String,

    #[serde(default = "default_jurisdictions")]
    pub jurisdictions: Vec<String>,

    /// Competitor names declared by the user
    #[serde(default)]
    pub known_competitors: Vec<String>,

    /// Widens query construction only
    #[serde(default)]
    pub product_keywords: Vec<String>,
}

fn default_general() -> String {
    "General".to_string()
}

fn default_jurisdictions() -> Vec<String> {
    vec!["India".to_string()]
}

impl ResearchRequest {
    pub fn new(brand_name: impl Into<String>) -> Self {
        Self {
            brand_name: brand_name.into(),
            industry: default_general(),
            category: default_general(),
            jurisdictions: default_jurisdictions(),
            known_competitors: Vec::new(),
            product_keywords: Vec::new(),
        }
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_jurisdictions(mut self, jurisdictions: Vec<String>) -> Self {
        self.jurisdictions = jurisdictions;
        self
    }

    pub fn with_competitors(mut self, competitors: Vec<String>) -> Self {
        self.known_competitors = competitors;
        self
    }

    pub fn with_product_keywords(mut self, keywords: Vec<String>) -> Self {
        self.product_keywords = keywords;
        self
    }
}

/// Everything learned about one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
    pub brand_name: String,
    pub industry: String,
    pub category: String,
    pub jurisdictions: Vec<String>,
    pub nice_classification: NiceClassification,

    #[serde(default)]
    pub trademark_conflicts: Vec<TrademarkConflict>,

    #[serde(default)]
    pub company_conflicts: Vec<CompanyConflict>,

    #[serde(default)]
    pub common_law_conflicts: Vec<CommonLawConflict>,

    #[serde(default)]
    pub legal_precedents: Vec<LegalPrecedent>,

    #[serde(default)]
    pub risk_profile: RiskProfile,
}

impl ResearchResult {
    /// An empty result for `request`, before any conflicts are merged in.
    pub fn new(request: &ResearchRequest, nice_classification: NiceClassification) -> Self {
        Self {
            brand_name: request.brand_name.clone(),
            industry: request.industry.clone(),
            category: request.category.clone(),
            jurisdictions: request.jurisdictions.clone(),
            nice_classification,
            trademark_conflicts: Vec::new(),
            company_conflicts: Vec::new(),
            common_law_conflicts: Vec::new(),
            legal_precedents: Vec::new(),
            risk_profile: RiskProfile::default(),
        }
    }

    pub fn total_conflicts(&self) -> usize {
        self.trademark_conflicts.len() + self.company_conflicts.len() + self.common_law_conflicts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_result_aliases_and_nulls() {
        let json = r#"{"title": "Acme Store", "body": "Buy now", "href": null}"#;
        let parsed: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.title, "Acme Store");
        assert_eq!(parsed.snippet, "Buy now");
        assert_eq!(parsed.url, "");

        let empty: SearchResult = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, SearchResult::default());
    }

    #[test]
    fn test_result_set_groups_default_empty() {
        let parsed: SearchResultSet =
            serde_json::from_str(r#"{"company": [{"title": "Acme Pvt Ltd"}]}"#).unwrap();
        assert!(parsed.trademark.is_empty());
        assert!(parsed.common_law.is_empty());
        assert_eq!(parsed.company[0].title, "Acme Pvt Ltd");
        assert_eq!(parsed.len(), 1);
        assert!(SearchResultSet::default().is_empty());
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(ConflictType::default(), ConflictType::Filing);
        assert_eq!(CompanyStatus::default(), CompanyStatus::Unknown);
    }

    #[test]
    fn test_trademark_risk_from_status() {
        assert_eq!(RiskLevel::for_trademark_status(Some(TrademarkStatus::Registered)), RiskLevel::High);
        assert_eq!(RiskLevel::for_trademark_status(Some(TrademarkStatus::Pending)), RiskLevel::Medium);
        assert_eq!(RiskLevel::for_trademark_status(Some(TrademarkStatus::Objected)), RiskLevel::Low);
        assert_eq!(RiskLevel::for_trademark_status(Some(TrademarkStatus::Abandoned)), RiskLevel::Medium);
        assert_eq!(RiskLevel::for_trademark_status(None), RiskLevel::Medium);
    }

    #[test]
    fn test_company_risk_from_name() {
        assert_eq!(RiskLevel::for_company("Luminara", "LUMINARA Lifestyle Pvt Ltd"), RiskLevel::High);
        assert_eq!(RiskLevel::for_company("Luminara", "Lumina Retail LLP"), RiskLevel::Medium);
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Critical > RiskLevel::High);
        assert!(RiskLevel::Medium > RiskLevel::Low);
        assert_eq!(RiskLevel::for_common_law(true), RiskLevel::Medium);
        assert_eq!(RiskLevel::for_common_law(false), RiskLevel::Low);
    }

    #[test]
    fn test_request_defaults() {
        let parsed: ResearchRequest = serde_json::from_str(r#"{"brand_name": "Acme"}"#).unwrap();
        assert_eq!(parsed, ResearchRequest::new("Acme"));
        assert_eq!(parsed.jurisdictions, vec!["India".to_string()]);
        assert_eq!(parsed.category, "General");
    }

    #[test]
    fn test_status_serialization() {
        let conflict = TrademarkConflict::new("ACME", "USPTO", Some(TrademarkStatus::Registered));
        let json = serde_json::to_string(&conflict).unwrap();
        assert!(json.contains("\"REGISTERED\""));
        assert!(json.contains("\"filing\""));
        assert!(json.contains("\"HIGH\""));
    }
}
