//! Fixed-format text rendering of research results.
//!
//! The block produced here is consumed by the narrative-generation layer,
//! which parses it by position. Every field is always rendered; absent
//! values print as "N/A" or "Unknown" so the layout never shifts.

use brandcheck_model::{
    CommonLawConflict, CompanyConflict, LegalPrecedent, ResearchResult, RiskProfile,
    TrademarkConflict,
};
use chrono::{DateTime, Utc};
use std::fmt;

pub const MAX_TRADEMARKS: usize = 10;
pub const MAX_COMPANIES: usize = 10;
pub const MAX_COMMON_LAW: usize = 5;
pub const MAX_PRECEDENTS: usize = 5;

const NA: &str = "N/A";
const UNKNOWN: &str = "Unknown";
const NONE_FOUND: &str = "None found.";

const FOOTER: &[&str] = &[
    "Use only the conflicts and precedents listed above; do not invent additional records.",
    "Explain the overall risk score and both probabilities in plain language.",
    "Discuss the highest-risk conflicts first and cite precedents by case name.",
    "Recommend concrete next steps (clearance search, class selection, name alternatives).",
    "State clearly that this is a heuristic assessment, not legal advice.",
];

/// Renders a [`ResearchResult`] as the fixed prompt block.
pub struct PromptBlock<'a> {
    result: &'a ResearchResult,
    generated_at: DateTime<Utc>,
}

impl<'a> PromptBlock<'a> {
    pub fn new(result: &'a ResearchResult, generated_at: DateTime<Utc>) -> Self {
        Self {
            result,
            generated_at,
        }
    }
}

/// Render the prompt block for `result`, stamped with `generated_at`.
pub fn render_prompt(result: &ResearchResult, generated_at: DateTime<Utc>) -> String {
    PromptBlock::new(result, generated_at).to_string()
}

/// One-line risk summary.
pub fn summarize_risk(profile: &RiskProfile) -> String {
    if profile.total_conflicts_found == 0 {
        return "LOW RISK: no conflicts found.".to_string();
    }
    format!(
        "{} RISK: score {}/10, {} critical and {} high-risk of {} conflicts",
        profile.band(),
        profile.overall_risk_score,
        profile.critical_conflicts_count,
        profile.high_risk_conflicts_count,
        profile.total_conflicts_found
    )
}

fn or<'s>(value: Option<&'s str>, fallback: &'s str) -> &'s str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(fallback)
}

fn text_or<'s>(value: &'s str, fallback: &'s str) -> &'s str {
    or(Some(value), fallback)
}

fn section_header(f: &mut fmt::Formatter<'_>, title: &str, shown: usize, total: usize) -> fmt::Result {
    writeln!(f)?;
    let heading = format!("{} ({} of {})", title, shown, total);
    writeln!(f, "{}", heading)?;
    writeln!(f, "{}", "-".repeat(heading.len()))
}

fn write_trademark(f: &mut fmt::Formatter<'_>, index: usize, t: &TrademarkConflict) -> fmt::Result {
    let class = t.class_number.map(|c| c.to_string());
    writeln!(f, "{}. {} [{}]", index, t.name, t.risk_level.label())?;
    writeln!(
        f,
        "   Status: {} | Class: {} | Application No: {}",
        t.status.map(|s| s.label()).unwrap_or(UNKNOWN),
        or(class.as_deref(), NA),
        or(t.application_number.as_deref(), NA)
    )?;
    writeln!(
        f,
        "   Owner: {} | Filed: {} | Type: {}",
        or(t.owner.as_deref(), UNKNOWN),
        or(t.filing_date.as_deref(), NA),
        t.conflict_type.label()
    )?;
    writeln!(f, "   Source: {} | URL: {}", text_or(&t.source, UNKNOWN), text_or(&t.url, NA))?;
    writeln!(f, "   Details: {}", text_or(&t.details, NA))
}

fn write_company(f: &mut fmt::Formatter<'_>, index: usize, c: &CompanyConflict) -> fmt::Result {
    writeln!(f, "{}. {} [{}]", index, c.name, c.risk_level.label())?;
    writeln!(
        f,
        "   Status: {} | Registration ID: {} | Incorporated: {}",
        c.status.label(),
        or(c.registration_id.as_deref(), NA),
        or(c.incorporation_date.as_deref(), NA)
    )?;
    writeln!(
        f,
        "   Industry: {} | Region: {}",
        or(c.industry.as_deref(), UNKNOWN),
        or(c.region.as_deref(), UNKNOWN)
    )?;
    writeln!(f, "   Source: {} | URL: {}", text_or(&c.source, UNKNOWN), text_or(&c.url, NA))?;
    writeln!(f, "   Overlap: {}", or(c.overlap_analysis.as_deref(), NA))
}

fn write_common_law(f: &mut fmt::Formatter<'_>, index: usize, c: &CommonLawConflict) -> fmt::Result {
    writeln!(f, "{}. {} [{}]", index, c.name, c.risk_level.label())?;
    writeln!(
        f,
        "   Platform: {} | Industry Match: {}",
        text_or(&c.platform, UNKNOWN),
        if c.industry_match { "Yes" } else { "No" }
    )?;
    writeln!(f, "   URL: {}", text_or(&c.url, NA))?;
    writeln!(f, "   Snippet: {}", text_or(&c.snippet, NA))
}

fn write_precedent(f: &mut fmt::Formatter<'_>, index: usize, p: &LegalPrecedent) -> fmt::Result {
    writeln!(f, "{}. {} ({})", index, p.case_name, or(p.year.as_deref(), NA))?;
    writeln!(f, "   Court: {}", or(p.court.as_deref(), NA))?;
    writeln!(f, "   Relevance: {}", text_or(&p.relevance, NA))?;
    writeln!(f, "   Key Principle: {}", or(p.key_principle.as_deref(), NA))?;
    writeln!(f, "   Source: {} | URL: {}", text_or(&p.source, NA), or(p.url.as_deref(), NA))
}

fn write_section<T>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    items: &[T],
    limit: usize,
    write_item: fn(&mut fmt::Formatter<'_>, usize, &T) -> fmt::Result,
) -> fmt::Result {
    let shown = items.len().min(limit);
    section_header(f, title, shown, items.len())?;
    if items.is_empty() {
        return writeln!(f, "{}", NONE_FOUND);
    }
    for (i, item) in items.iter().take(limit).enumerate() {
        write_item(f, i + 1, item)?;
    }
    Ok(())
}

impl fmt::Display for PromptBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        let risk = &r.risk_profile;
        let jurisdictions = r.jurisdictions.join(", ");

        writeln!(f, "BRAND CONFLICT RESEARCH")?;
        writeln!(f, "=======================")?;
        writeln!(f, "Brand: {}", r.brand_name)?;
        writeln!(f, "Industry: {}", text_or(&r.industry, UNKNOWN))?;
        writeln!(f, "Category: {}", text_or(&r.category, UNKNOWN))?;
        writeln!(f, "Jurisdictions: {}", text_or(&jurisdictions, NA))?;
        writeln!(
            f,
            "Nice Class: {} - {} (matched: {})",
            r.nice_classification.class_number,
            r.nice_classification.description,
            r.nice_classification.matched_term
        )?;
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;

        writeln!(f)?;
        writeln!(f, "RISK SUMMARY")?;
        writeln!(f, "------------")?;
        writeln!(f, "Overall Risk Score: {}/10 ({})", risk.overall_risk_score, risk.band())?;
        writeln!(f, "Registration Success Probability: {}%", risk.registration_success_probability)?;
        writeln!(f, "Opposition Probability: {}%", risk.opposition_probability)?;
        writeln!(f, "Critical Conflicts: {}", risk.critical_conflicts_count)?;
        writeln!(f, "High-Risk Conflicts: {}", risk.high_risk_conflicts_count)?;
        writeln!(f, "Total Conflicts Found: {}", risk.total_conflicts_found)?;

        write_section(f, "TRADEMARK CONFLICTS", &r.trademark_conflicts, MAX_TRADEMARKS, write_trademark)?;
        write_section(f, "COMPANY CONFLICTS", &r.company_conflicts, MAX_COMPANIES, write_company)?;
        write_section(f, "COMMON-LAW CONFLICTS", &r.common_law_conflicts, MAX_COMMON_LAW, write_common_law)?;
        write_section(f, "LEGAL PRECEDENTS", &r.legal_precedents, MAX_PRECEDENTS, write_precedent)?;

        writeln!(f)?;
        writeln!(f, "INSTRUCTIONS")?;
        writeln!(f, "------------")?;
        for line in FOOTER {
            writeln!(f, "- {}", line)?;
        }
        Ok(())
    }
}
