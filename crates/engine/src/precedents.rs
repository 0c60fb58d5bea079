//! Legal precedent selection.

use brandcheck_model::LegalPrecedent;
use brandcheck_reference::{ReferenceTables, DEFAULT_JURISDICTION};

pub const MAX_PRECEDENTS: usize = 5;

/// Precedents supporting a risk assessment in the primary jurisdiction.
///
/// The first jurisdiction is resolved through the alias rules; one the bank
/// does not cover falls back to the default (USA). Phonetic-similarity
/// precedents come first, then fashion precedents when the category is
/// fashion-related, then general ones, capped at [`MAX_PRECEDENTS`].
pub fn select_precedents(
    tables: &ReferenceTables,
    category: &str,
    industry: &str,
    jurisdictions: &[String],
) -> Vec<LegalPrecedent> {
    let primary = jurisdictions.first().map(String::as_str).unwrap_or_default();

    let (key, groups) = match tables
        .resolve_jurisdiction(primary)
        .and_then(|key| tables.precedent_groups(key).map(|groups| (key, groups)))
    {
        Some(found) => found,
        None => {
            tracing::debug!(
                jurisdiction = %primary,
                fallback = DEFAULT_JURISDICTION,
                "No precedent bank entry, using default jurisdiction"
            );
            tables.default_precedent_groups()
        }
    };

    let fashion = tables.is_fashion_category(category);

    let mut selected: Vec<LegalPrecedent> = groups.phonetic_similarity.clone();
    if fashion {
        selected.extend(groups.fashion.iter().cloned());
    }
    selected.extend(groups.general.iter().cloned());
    selected.truncate(MAX_PRECEDENTS);

    tracing::debug!(
        jurisdiction = key,
        industry = %industry,
        fashion,
        count = selected.len(),
        "Selected legal precedents"
    );
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> ReferenceTables {
        ReferenceTables::builtin().unwrap()
    }

    fn names(precedents: &[LegalPrecedent]) -> Vec<&str> {
        precedents.iter().map(|p| p.case_name.as_str()).collect()
    }

    #[test]
    fn test_unknown_jurisdiction_falls_back_to_usa() {
        let tables = tables();
        let unknown = select_precedents(&tables, "X", "Y", &["Atlantis".to_string()]);
        let usa = select_precedents(&tables, "X", "Y", &["USA".to_string()]);
        assert_eq!(unknown, usa);
        assert!(!usa.is_empty());
    }

    #[test]
    fn test_empty_jurisdictions_fall_back_to_usa() {
        let tables = tables();
        assert_eq!(
            select_precedents(&tables, "SaaS", "Tech", &[]),
            select_precedents(&tables, "SaaS", "Tech", &["United States".to_string()])
        );
    }

    #[test]
    fn test_only_primary_jurisdiction_is_used() {
        let tables = tables();
        assert_eq!(
            select_precedents(&tables, "SaaS", "Tech", &["UK".to_string(), "India".to_string()]),
            select_precedents(&tables, "SaaS", "Tech", &["Britain".to_string()])
        );
    }

    #[test]
    fn test_fashion_group_only_for_fashion_categories() {
        let tables = tables();
        let groups = tables.precedent_groups("USA").unwrap();

        let saas = select_precedents(&tables, "SaaS", "Tech", &["USA".to_string()]);
        assert!(groups.fashion.iter().all(|p| !saas.contains(p)));

        let apparel = select_precedents(&tables, "Streetwear", "Fashion", &["USA".to_string()]);
        assert!(groups.fashion.iter().all(|p| apparel.contains(p)));
    }

    #[test]
    fn test_phonetic_first_and_capped() {
        let tables = tables();
        let groups = tables.precedent_groups("EU").unwrap();
        let selected = select_precedents(&tables, "Footwear", "Fashion", &["Germany".to_string()]);

        assert_eq!(selected.len(), MAX_PRECEDENTS);
        assert_eq!(
            names(&selected[..groups.phonetic_similarity.len()]),
            names(&groups.phonetic_similarity)
        );
        // General precedents are the ones cut.
        assert!(selected.contains(&groups.general[0]));
        assert!(!selected.contains(&groups.general[1]));
    }
}
