//! Risk scoring for merged conflict sets.
//!
//! Turns the trademark, company and common-law conflicts found for a brand
//! into a [`RiskProfile`]. Severity tiers are evaluated in strict priority
//! order (critical, high, medium, everything else) and each output is
//! computed on its own from the tallies.

use brandcheck_model::{CommonLawConflict, CompanyConflict, RiskLevel, RiskProfile, TrademarkConflict};

/// Severity tallies over trademark and company conflicts.
///
/// Common-law conflicts and LOW conflicts only count towards `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub total: usize,
}

impl SeverityCounts {
    pub fn from_conflicts(
        trademarks: &[TrademarkConflict],
        companies: &[CompanyConflict],
        common_law: &[CommonLawConflict],
    ) -> Self {
        let mut counts = Self {
            total: trademarks.len() + companies.len() + common_law.len(),
            ..Self::default()
        };

        let levels = trademarks
            .iter()
            .map(|t| t.risk_level)
            .chain(companies.iter().map(|c| c.risk_level));
        for level in levels {
            match level {
                RiskLevel::Critical => counts.critical += 1,
                RiskLevel::High => counts.high += 1,
                RiskLevel::Medium => counts.medium += 1,
                RiskLevel::Low => {}
            }
        }

        counts
    }
}

/// Score a conflict set.
pub fn score_conflicts(
    trademarks: &[TrademarkConflict],
    companies: &[CompanyConflict],
    common_law: &[CommonLawConflict],
) -> RiskProfile {
    profile_from_counts(SeverityCounts::from_conflicts(trademarks, companies, common_law))
}

pub fn profile_from_counts(counts: SeverityCounts) -> RiskProfile {
    RiskProfile {
        overall_risk_score: overall_risk_score(counts),
        registration_success_probability: registration_success_probability(counts),
        opposition_probability: opposition_probability(counts),
        critical_conflicts_count: counts.critical,
        high_risk_conflicts_count: counts.high,
        total_conflicts_found: counts.total,
    }
}

/// 1-10. A single critical conflict outranks any number of lesser ones.
///
/// With no critical, high or medium conflicts the score is the total
/// capped at 3, however many LOW conflicts there are.
pub fn overall_risk_score(counts: SeverityCounts) -> u8 {
    let score = if counts.critical > 0 {
        (8 + counts.critical).min(10)
    } else if counts.high > 0 {
        (5 + counts.high).min(9)
    } else if counts.medium > 0 {
        (3 + counts.medium).min(6)
    } else {
        counts.total.clamp(1, 3)
    };
    score as u8
}

/// 0-100 chance the brand registers without trouble.
pub fn registration_success_probability(counts: SeverityCounts) -> u8 {
    let critical = counts.critical as i64;
    let high = counts.high as i64;
    let medium = counts.medium as i64;

    let probability = if critical > 0 {
        (30 - 10 * critical).max(10)
    } else if high > 0 {
        (60 - 10 * high).max(30)
    } else if medium > 0 {
        (80 - 5 * medium).max(50)
    } else {
        let clean_bonus = if counts.total == 0 { 5 } else { 0 };
        (85 + clean_bonus).min(90)
    };
    probability as u8
}

/// 0-100 chance of an opposition being filed.
pub fn opposition_probability(counts: SeverityCounts) -> u8 {
    let critical = counts.critical as i64;
    let high = counts.high as i64;
    let medium = counts.medium as i64;

    let probability = if critical > 0 || high > 1 {
        (60 + 15 * critical + 10 * high).min(90)
    } else if high == 1 {
        50
    } else if medium > 0 {
        (20 + 5 * medium).min(40)
    } else {
        10
    };
    probability as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandcheck_model::TrademarkStatus;

    fn counts(critical: usize, high: usize, medium: usize, total: usize) -> SeverityCounts {
        SeverityCounts {
            critical,
            high,
            medium,
            total,
        }
    }

    fn trademark(level: RiskLevel) -> TrademarkConflict {
        TrademarkConflict {
            risk_level: level,
            ..TrademarkConflict::new("MARK", "test", Some(TrademarkStatus::Registered))
        }
    }

    #[test]
    fn test_clean_slate() {
        let profile = score_conflicts(&[], &[], &[]);
        assert_eq!(profile.overall_risk_score, 1);
        assert_eq!(profile.registration_success_probability, 90);
        assert_eq!(profile.opposition_probability, 10);
        assert_eq!(profile.total_conflicts_found, 0);
    }

    #[test]
    fn test_critical_dominates() {
        let profile = profile_from_counts(counts(1, 0, 7, 8));
        assert_eq!(profile.overall_risk_score, 9);
        assert_eq!(profile.registration_success_probability, 20);
        assert_eq!(profile.opposition_probability, 75);
    }

    #[test]
    fn test_caps_and_floors() {
        let profile = profile_from_counts(counts(5, 3, 0, 8));
        assert_eq!(profile.overall_risk_score, 10);
        assert_eq!(profile.registration_success_probability, 10);
        assert_eq!(profile.opposition_probability, 90);

        let profile = profile_from_counts(counts(0, 6, 0, 6));
        assert_eq!(profile.overall_risk_score, 9);
        assert_eq!(profile.registration_success_probability, 30);

        let profile = profile_from_counts(counts(0, 0, 9, 9));
        assert_eq!(profile.overall_risk_score, 6);
        assert_eq!(profile.registration_success_probability, 50);
        assert_eq!(profile.opposition_probability, 40);
    }

    #[test]
    fn test_single_high_conflict() {
        let profile = profile_from_counts(counts(0, 1, 0, 1));
        assert_eq!(profile.overall_risk_score, 6);
        assert_eq!(profile.registration_success_probability, 50);
        assert_eq!(profile.opposition_probability, 50);

        let profile = profile_from_counts(counts(0, 2, 1, 3));
        assert_eq!(profile.overall_risk_score, 7);
        assert_eq!(profile.registration_success_probability, 40);
        assert_eq!(profile.opposition_probability, 80);
    }

    #[test]
    fn test_many_low_conflicts_stay_low() {
        // Only LOW and common-law conflicts: the score never climbs past 3.
        let profile = profile_from_counts(counts(0, 0, 0, 4));
        assert_eq!(profile.overall_risk_score, 3);
        assert_eq!(profile.registration_success_probability, 85);
        assert_eq!(profile.opposition_probability, 10);

        let profile = profile_from_counts(counts(0, 0, 0, 2));
        assert_eq!(profile.overall_risk_score, 2);
    }

    #[test]
    fn test_counts_ignore_common_law_and_low() {
        let trademarks = vec![trademark(RiskLevel::High), trademark(RiskLevel::Low)];
        let common_law = vec![CommonLawConflict::new("shop", "Website", true)];
        let counts = SeverityCounts::from_conflicts(&trademarks, &[], &common_law);
        assert_eq!(counts, SeverityCounts { critical: 0, high: 1, medium: 0, total: 3 });
    }

    #[test]
    fn test_adding_critical_is_monotonic() {
        for critical in 0..4 {
            for high in 0..4 {
                for medium in 0..4 {
                    let base = counts(critical, high, medium, critical + high + medium);
                    let worse = counts(critical + 1, high, medium, base.total + 1);
                    assert!(overall_risk_score(worse) >= overall_risk_score(base));
                    assert!(
                        registration_success_probability(worse)
                            <= registration_success_probability(base)
                    );
                    assert!(opposition_probability(worse) >= opposition_probability(base));
                }
            }
        }
    }
}
