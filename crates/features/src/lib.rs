//! Text features for brand conflict matching.
//!
//! Provides pure functions shared by the extractors and the merge layer:
//! - Phonetic spelling variants from a fixed substitution table
//! - Name normalization
//! - Brand-mention checks
//! - Character-set overlap

use std::collections::HashSet;

/// Maximum number of variants returned by [`generate_variants`].
pub const MAX_VARIANTS: usize = 5;

/// Directional substitutions, applied in this order.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("i", "ee"),
    ("ee", "i"),
    ("i", "y"),
    ("y", "i"),
    ("c", "k"),
    ("k", "c"),
    ("ph", "f"),
    ("f", "ph"),
    ("s", "z"),
    ("z", "s"),
    ("x", "ks"),
    ("ks", "x"),
    ("ou", "u"),
    ("u", "ou"),
    ("oo", "u"),
    ("u", "oo"),
    ("ae", "e"),
    ("e", "ae"),
];

/// Generate up to five lowercase spelling variants of a brand name.
///
/// Each rule replaces every occurrence in one pass over the original, so a
/// rule contributes at most one variant. Names ending in `a` or `e` also get
/// a swapped-suffix and a dropped-suffix variant. The original is never
/// included and output order is fixed.
pub fn generate_variants(name: &str) -> Vec<String> {
    let original = normalize_name(name);
    if original.chars().count() < 2 {
        return Vec::new();
    }

    let mut candidates: Vec<String> = SUBSTITUTIONS
        .iter()
        .filter(|(from, _)| original.contains(from))
        .map(|(from, to)| original.replace(from, to))
        .collect();

    if let Some(stem) = original.strip_suffix('a') {
        candidates.push(format!("{}e", stem));
        candidates.push(stem.to_string());
    } else if let Some(stem) = original.strip_suffix('e') {
        candidates.push(format!("{}a", stem));
        candidates.push(stem.to_string());
    }

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|v| !v.is_empty() && *v != original && seen.insert(v.clone()))
        .take(MAX_VARIANTS)
        .collect()
}

/// Normalize a name for comparison: trimmed, lowercased, single-spaced.
pub fn normalize_name(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Does `text` mention the brand or one of its variants?
///
/// Case-insensitive substring match.
pub fn mentions_brand(text: &str, brand_name: &str, variants: &[String]) -> bool {
    let brand = normalize_name(brand_name);
    if brand.is_empty() {
        return false;
    }
    let haystack = text.to_lowercase();
    haystack.contains(&brand) || variants.iter().any(|v| haystack.contains(v.as_str()))
}

/// Share of the brand's length covered by characters it has in common
/// with `other`: `|chars(brand) ∩ chars(other)| / len(brand)`.
///
/// A coarse signal only. It ignores order and repetition, so anagrams
/// score 1.0.
pub fn char_overlap_ratio(brand_name: &str, other: &str) -> f64 {
    let brand = normalize_name(brand_name);
    let length = brand.chars().count();
    if length == 0 {
        return 0.0;
    }

    let brand_chars: HashSet<char> = brand.chars().collect();
    let other_chars: HashSet<char> = normalize_name(other).chars().collect();
    brand_chars.intersection(&other_chars).count() as f64 / length as f64
}

/// Truncate to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_exclude_original() {
        let variants = generate_variants("zomato");
        assert!(!variants.contains(&"zomato".to_string()));
        assert!(variants.len() <= MAX_VARIANTS);
        assert_eq!(variants, vec!["somato"]);
    }

    #[test]
    fn test_variants_are_deterministic() {
        assert_eq!(generate_variants("Luminara"), generate_variants("luminara"));
        assert_eq!(
            generate_variants("Luminara"),
            vec!["lumeenara", "lumynara", "louminara", "loominara", "luminare"]
        );
    }

    #[test]
    fn test_variants_suffix_rules() {
        // No substitution applies to "gola", so only the suffix rules fire.
        assert_eq!(generate_variants("Gola"), vec!["gole", "gol"]);
        assert_eq!(generate_variants("brae"), vec!["bre", "braae", "braa", "bra"]);
    }

    #[test]
    fn test_variants_short_names() {
        assert!(generate_variants("").is_empty());
        assert!(generate_variants("i").is_empty());
        assert!(generate_variants("   ").is_empty());
    }

    #[test]
    fn test_variants_have_no_duplicates() {
        let variants = generate_variants("Kiksy");
        let unique: HashSet<_> = variants.iter().collect();
        assert_eq!(unique.len(), variants.len());
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Pay   Quick "), "pay quick");
        assert_eq!(normalize_name("LUMINARA"), "luminara");
    }

    #[test]
    fn test_mentions_brand() {
        let variants = generate_variants("Luminara");
        assert!(mentions_brand("Shop LUMINARA online", "Luminara", &variants));
        assert!(mentions_brand("lumynara streetwear", "Luminara", &variants));
        assert!(!mentions_brand("nothing relevant", "Luminara", &variants));
        assert!(!mentions_brand("anything", "  ", &[]));
    }

    #[test]
    fn test_char_overlap_ratio() {
        assert_eq!(char_overlap_ratio("abcd", "dcba"), 1.0);
        assert_eq!(char_overlap_ratio("abcd", "abxy"), 0.5);
        assert_eq!(char_overlap_ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo world", 5), "héllo");
        assert_eq!(truncate_chars("short", 50), "short");
    }
}
