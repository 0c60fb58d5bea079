//! Shared extraction primitives: status markers, identifiers, names and
//! provenance labels.

use brandcheck_model::{CompanyStatus, SearchResult, TrademarkStatus};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

// =============================================================================
// STATUS MARKERS
// =============================================================================

/// Trademark status markers. Order is the tie-break: the first class with a
/// hit wins.
static TRADEMARK_STATUS_MARKERS: LazyLock<Vec<(TrademarkStatus, Regex)>> = LazyLock::new(|| {
    vec![
        (TrademarkStatus::Registered, Regex::new(r"\bregistered\b").unwrap()),
        (
            TrademarkStatus::Pending,
            Regex::new(r"\b(?:pending|under examination|awaiting examination|advertised)\b").unwrap(),
        ),
        (TrademarkStatus::Objected, Regex::new(r"\bobject(?:ed|ion)\b").unwrap()),
        (TrademarkStatus::Opposed, Regex::new(r"\boppos(?:ed|ition)\b").unwrap()),
        (
            TrademarkStatus::Abandoned,
            Regex::new(r"\b(?:abandoned|withdrawn|refused)\b").unwrap(),
        ),
    ]
});

static COMPANY_STATUS_MARKERS: LazyLock<Vec<(CompanyStatus, Regex)>> = LazyLock::new(|| {
    vec![
        (
            CompanyStatus::Dissolved,
            Regex::new(r"\b(?:dissolved|struck off|strike off|liquidated|wound up)\b").unwrap(),
        ),
        (
            CompanyStatus::Inactive,
            Regex::new(r"\b(?:inactive|dormant|under liquidation)\b").unwrap(),
        ),
        (CompanyStatus::Active, Regex::new(r"\bactive\b").unwrap()),
    ]
});

/// First trademark status whose markers appear in `text_lower`.
pub fn classify_status(text_lower: &str) -> Option<TrademarkStatus> {
    TRADEMARK_STATUS_MARKERS
        .iter()
        .find(|(_, re)| re.is_match(text_lower))
        .map(|(status, _)| *status)
}

pub fn classify_company_status(text_lower: &str) -> CompanyStatus {
    COMPANY_STATUS_MARKERS
        .iter()
        .find(|(_, re)| re.is_match(text_lower))
        .map(|(status, _)| *status)
        .unwrap_or_default()
}

// =============================================================================
// IDENTIFIERS
// =============================================================================

static APPLICATION_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:application|appln?|serial|tm)\.?\s*(?:no\.?|number|#)?\s*[:#\-]?\s*(\d{6,8})\b")
        .unwrap()
});

/// Bare 7-digit filing number (IP India format).
static BARE_FILING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{7})\b").unwrap());

/// Indian Corporate Identification Number.
static CIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([LU]\d{5}[A-Z]{2}\d{4}[A-Z]{3}\d{6})\b").unwrap());

/// Indian LLP Identification Number.
static LLPIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b([A-Z]{3}-\d{4})\b").unwrap());

/// UK Companies House number.
static UK_COMPANY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bcompany\s+(?:no\.?|number)\s*:?\s*([A-Z]{2}\d{6}|\d{8})\b").unwrap()
});

static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bclass\s*(?:no\.?\s*)?(\d{1,2})\b").unwrap());

const DATE_PATTERN: &str = r"\d{1,2}[/-]\d{1,2}[/-]\d{4}|\d{4}-\d{2}-\d{2}|\d{1,2}\s+[A-Za-z]{3,9},?\s+\d{4}";

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b({})\b", DATE_PATTERN)).unwrap());

static FILING_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:filed|filing date|date of application|applied)\s*(?:on)?\s*:?\s*({})",
        DATE_PATTERN
    ))
    .unwrap()
});

static INCORPORATION_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)incorporat\w*\s*(?:on|date)?\s*:?\s*({})",
        DATE_PATTERN
    ))
    .unwrap()
});

static OWNER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:owner|proprietor|applicant|owned by)\s*[:\-]?\s*([a-z][a-z0-9&.,' ]{1,60}?)(?:\s*[|;\n]|\.\s|\s-\s|$)",
    )
    .unwrap()
});

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Trademark application/serial number: a labelled number first, then any
/// bare 7-digit number.
pub fn application_number(text: &str) -> Option<String> {
    first_capture(&APPLICATION_NUMBER_RE, text).or_else(|| first_capture(&BARE_FILING_RE, text))
}

/// Company registration identifier (CIN, LLPIN or UK company number).
pub fn registration_id(text: &str) -> Option<String> {
    first_capture(&CIN_RE, text)
        .or_else(|| first_capture(&LLPIN_RE, text))
        .or_else(|| first_capture(&UK_COMPANY_RE, text))
}

/// Nice class mentioned in the text, if it is a valid class number.
pub fn class_number(text: &str) -> Option<u8> {
    CLASS_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u8>().ok())
        .find(|class| (1..=45).contains(class))
}

pub fn filing_date(text: &str) -> Option<String> {
    first_capture(&FILING_DATE_RE, text).or_else(|| first_capture(&DATE_RE, text))
}

pub fn incorporation_date(text: &str) -> Option<String> {
    first_capture(&INCORPORATION_DATE_RE, text)
}

pub fn owner(text: &str) -> Option<String> {
    first_capture(&OWNER_RE, text)
        .map(|o| o.trim_end_matches([',', '.', ' ']).to_string())
        .filter(|o| o.chars().count() >= 2)
}

// =============================================================================
// NAMES
// =============================================================================

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["“”]([^"“”]{2,60})["“”]"#).unwrap());

static NAME_BEFORE_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][\w&'\-]*(?:\s+[A-Z][\w&'\-]*){0,3})\s+(?i:trademark|trade mark|brand|mark)\b")
        .unwrap()
});

static NAME_AFTER_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:trademark|trade mark|brand|mark)\s*(?:for|of|:|-)?\s+([A-Z][\w&'\-]*(?:\s+[A-Z][\w&'\-]*){0,3})")
        .unwrap()
});

static COMPANY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b([A-Z][\w&'.\-]*(?:\s+[A-Z][\w&'.\-]*){0,5}?\s+(?i:private limited|pvt\.?\s*ltd\.?|limited|ltd\.?|llp|llc|inc\.?|corporation|corp\.?|gmbh|plc)\b)",
    )
    .unwrap()
});

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s(])@([A-Za-z0-9_.]{3,30})").unwrap());

/// Words that show up around names in registry listings but are never the
/// name itself.
const GENERIC_WORDS: &[&str] = &[
    "a", "about", "application", "applied", "brand", "check", "class", "company", "database",
    "details", "free", "india", "info", "information", "ip", "logo", "mark", "new", "of",
    "official", "online", "pending", "public", "registered", "registration", "registry",
    "result", "results", "search", "status", "the", "tm", "trade", "trademark", "trademarks",
    "word", "euipo", "uspto", "wipo",
];

fn is_generic(word: &str) -> bool {
    GENERIC_WORDS.contains(&word.to_lowercase().trim_matches(|c: char| !c.is_alphanumeric()))
}

/// Drop generic words from both ends; `None` if nothing specific remains.
fn clean_candidate(candidate: &str) -> Option<String> {
    let words: Vec<&str> = candidate.split_whitespace().collect();
    let start = words.iter().position(|w| !is_generic(w))?;
    let end = words.iter().rposition(|w| !is_generic(w))?;
    Some(words[start..=end].join(" "))
}

fn quoted_name(title: &str) -> Option<String> {
    QUOTED_RE
        .captures_iter(title)
        .filter_map(|caps| clean_candidate(caps.get(1)?.as_str()))
        .next()
}

fn keyword_anchored_name(title: &str) -> Option<String> {
    [&*NAME_BEFORE_KEYWORD_RE, &*NAME_AFTER_KEYWORD_RE]
        .into_iter()
        .flat_map(|re| re.captures_iter(title))
        .filter_map(|caps| clean_candidate(caps.get(1)?.as_str()))
        .next()
}

fn brand_if_mentioned(result: &SearchResult, brand_name: &str) -> Option<String> {
    let brand = brand_name.trim();
    if !brand.is_empty() && result.combined_lower().contains(&brand.to_lowercase()) {
        Some(brand.to_string())
    } else {
        None
    }
}

/// Name of the mark a result talks about.
///
/// A quoted substring in the title wins, then `<Name> trademark` or
/// `trademark <Name>` in the title, then the brand itself when the text
/// mentions it. Anything else has no usable name.
pub fn extract_name(result: &SearchResult, brand_name: &str) -> Option<String> {
    quoted_name(&result.title)
        .or_else(|| keyword_anchored_name(&result.title))
        .or_else(|| brand_if_mentioned(result, brand_name))
}

/// A company name ending in an entity suffix ("... Private Limited").
pub fn company_name(text: &str) -> Option<String> {
    COMPANY_NAME_RE.captures_iter(text).find_map(|caps| {
        let full = caps.get(1)?.as_str();
        let words: Vec<&str> = full.split_whitespace().collect();
        let start = words.iter().position(|w| !is_generic(w))?;
        Some(words[start..].join(" "))
    })
}

/// A social handle: an `@name` in the text, or the first path segment of
/// a social profile URL.
pub fn social_handle(result: &SearchResult) -> Option<String> {
    let text = format!("{} {}", result.title, result.snippet);
    if let Some(handle) = first_capture(&HANDLE_RE, &text) {
        let handle = handle.trim_end_matches('.');
        if handle.chars().count() >= 3 {
            return Some(format!("@{}", handle));
        }
    }

    let url = Url::parse(&result.url).ok()?;
    let host = url.host_str()?.to_lowercase();
    if !["instagram.com", "facebook.com", "twitter.com", "x.com"]
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{}", d)))
    {
        return None;
    }
    url.path_segments()?
        .find(|s| !s.is_empty())
        .filter(|s| !["p", "reel", "explore", "pages", "hashtag"].contains(s))
        .map(|s| format!("@{}", s))
}

// =============================================================================
// PROVENANCE
// =============================================================================

const SOURCE_LABELS: &[(&str, &str)] = &[
    ("ipindia", "IP India"),
    ("uspto", "USPTO"),
    ("wipo", "WIPO"),
    ("euipo", "EUIPO"),
    ("ipo.gov.uk", "UK IPO"),
    ("mca.gov", "MCA"),
    ("zaubacorp", "ZaubaCorp"),
    ("tofler", "Tofler"),
    ("opencorporates", "OpenCorporates"),
    ("company-information.service.gov.uk", "Companies House"),
    ("quickcompany", "QuickCompany"),
    ("trademarkia", "Trademarkia"),
];

const PLATFORMS: &[(&str, &str)] = &[
    ("instagram", "Instagram"),
    ("facebook", "Facebook"),
    ("amazon", "Amazon"),
    ("flipkart", "Flipkart"),
    ("myntra", "Myntra"),
    ("meesho", "Meesho"),
    ("etsy", "Etsy"),
    ("linkedin", "LinkedIn"),
    ("twitter", "Twitter"),
    ("youtube", "YouTube"),
];

fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|h| h.trim_start_matches("www.").to_lowercase())
}

/// Provenance label for a result, from its URL host.
pub fn source_label(url: &str) -> &'static str {
    let host = host_of(url).unwrap_or_else(|| url.to_lowercase());
    SOURCE_LABELS
        .iter()
        .find(|(marker, _)| host.contains(marker))
        .map(|(_, label)| *label)
        .unwrap_or("Web Search")
}

/// Platform a common-law presence lives on. The URL host decides; without
/// a usable URL the text is scanned for platform names.
pub fn platform(result: &SearchResult) -> &'static str {
    let haystack = host_of(&result.url).unwrap_or_else(|| result.combined_lower());
    PLATFORMS
        .iter()
        .find(|(marker, _)| haystack.contains(marker))
        .map(|(_, label)| *label)
        .unwrap_or("Website")
}

const REGIONS: &[&str] = &[
    "Maharashtra", "Karnataka", "Delhi", "Tamil Nadu", "Telangana", "Gujarat", "West Bengal",
    "Uttar Pradesh", "Haryana", "Kerala", "Rajasthan", "Punjab", "Madhya Pradesh", "Goa",
    "California", "Delaware", "New York", "Texas", "Florida", "Washington", "England", "Scotland",
    "Wales", "Ontario", "New South Wales", "Victoria",
];

/// First known state/region named in the text.
pub fn region(text_lower: &str) -> Option<String> {
    REGIONS
        .iter()
        .find(|r| text_lower.contains(&r.to_lowercase()))
        .map(|r| r.to_string())
}

/// Distinctive words of an industry label, for snippet matching.
pub fn industry_terms(industry: &str) -> Vec<String> {
    industry
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 3 && !["general", "and", "the", "services", "industry"].contains(w))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_first_marker_wins() {
        assert_eq!(classify_status("mark registered, opposition filed"), Some(TrademarkStatus::Registered));
        assert_eq!(classify_status("opposed and abandoned"), Some(TrademarkStatus::Opposed));
        assert_eq!(classify_status("status: objected"), Some(TrademarkStatus::Objected));
        assert_eq!(classify_status("an unregistered label"), None);
        assert_eq!(classify_status("nothing here"), None);
    }

    #[test]
    fn test_company_status() {
        assert_eq!(classify_company_status("status: active"), CompanyStatus::Active);
        assert_eq!(classify_company_status("company is inactive"), CompanyStatus::Inactive);
        assert_eq!(classify_company_status("struck off, formerly active"), CompanyStatus::Dissolved);
        assert_eq!(classify_company_status("no status"), CompanyStatus::Unknown);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(application_number("Application No. 4471823 in class 25").as_deref(), Some("4471823"));
        assert_eq!(application_number("Serial Number: 97123456").as_deref(), Some("97123456"));
        assert_eq!(application_number("filed as 5932107 last year").as_deref(), Some("5932107"));
        assert_eq!(application_number("no numbers"), None);

        assert_eq!(
            registration_id("CIN U18101MH2019PTC325671 Maharashtra").as_deref(),
            Some("U18101MH2019PTC325671")
        );
        assert_eq!(registration_id("LLPIN: AAB-1234").as_deref(), Some("AAB-1234"));
        assert_eq!(registration_id("Company number 12345678").as_deref(), Some("12345678"));
    }

    #[test]
    fn test_class_number_bounds() {
        assert_eq!(class_number("Class 25 clothing"), Some(25));
        assert_eq!(class_number("class 99, class 9"), Some(9));
        assert_eq!(class_number("classy"), None);
    }

    #[test]
    fn test_dates_and_owner() {
        assert_eq!(filing_date("Filed on 14/03/2020").as_deref(), Some("14/03/2020"));
        assert_eq!(filing_date("updated 2021-07-01").as_deref(), Some("2021-07-01"));
        assert_eq!(incorporation_date("Incorporated on 12 June 2019").as_deref(), Some("12 June 2019"));
        assert_eq!(owner("Proprietor: Luminara Apparel Co | Class 25").as_deref(), Some("Luminara Apparel Co"));
    }

    #[test]
    fn test_extract_name_order() {
        let quoted = SearchResult::new("Trademark \"LUMINARA\" - IP India", "", "");
        assert_eq!(extract_name(&quoted, "Luminara").as_deref(), Some("LUMINARA"));

        let anchored = SearchResult::new("Search Lumynara Trademark Details", "", "");
        assert_eq!(extract_name(&anchored, "Luminara").as_deref(), Some("Lumynara"));

        let inverse = SearchResult::new("trademark for Lumynar", "", "");
        assert_eq!(extract_name(&inverse, "Luminara").as_deref(), Some("Lumynar"));

        let fallback = SearchResult::new("registry listing", "a luminara filing", "");
        assert_eq!(extract_name(&fallback, "Luminara").as_deref(), Some("Luminara"));

        let none = SearchResult::new("registry listing", "nothing", "");
        assert_eq!(extract_name(&none, "Luminara"), None);
    }

    #[test]
    fn test_company_name() {
        assert_eq!(
            company_name("About Luminara Lifestyle Private Limited - Company Details").as_deref(),
            Some("Luminara Lifestyle Private Limited")
        );
        assert_eq!(company_name("PayQuick Technologies LLP, Bengaluru").as_deref(), Some("PayQuick Technologies LLP"));
        assert_eq!(company_name("no company here"), None);
    }

    #[test]
    fn test_social_handle() {
        let text = SearchResult::new("Luminara", "Follow @luminara.wear for drops.", "");
        assert_eq!(social_handle(&text).as_deref(), Some("@luminara.wear"));

        let email = SearchResult::new("Contact", "mail hello@luminara.com", "");
        assert_eq!(social_handle(&email), None);

        let profile = SearchResult::new("Luminara", "", "https://www.instagram.com/luminara_official/");
        assert_eq!(social_handle(&profile).as_deref(), Some("@luminara_official"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(source_label("https://tmrsearch.ipindia.gov.in/eregister"), "IP India");
        assert_eq!(source_label("https://www.zaubacorp.com/company/x"), "ZaubaCorp");
        assert_eq!(source_label("not a url"), "Web Search");
        assert_eq!(platform(&SearchResult::new("", "", "https://www.amazon.in/dp/B0")), "Amazon");
        assert_eq!(platform(&SearchResult::new("", "on instagram", "")), "Instagram");
        assert_eq!(platform(&SearchResult::new("", "", "https://luminara.store")), "Website");
    }

    #[test]
    fn test_industry_terms() {
        assert_eq!(industry_terms("Fashion & Apparel"), vec!["fashion", "apparel"]);
        assert!(industry_terms("General").is_empty());
    }
}
