//! Slug derivation for municipalities, points of interest and tours.
//!
//! Slugs are never user-authored: they are recomputed from names on every
//! write. Nothing here enforces uniqueness.

use unicode_normalization::UnicodeNormalization;

/// Normalizes free text into a lowercase, hyphenated, ASCII identifier.
///
/// Trims, lowercases, decomposes (NFD), drops combining marks, keeps only
/// `[a-z0-9]`, whitespace and `-`, folds every run of whitespace and hyphens
/// into a single hyphen and strips leading and trailing hyphens.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    for c in kept.chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    slug.trim_matches('-').to_string()
}

/// `{PROVINCIA}-{slugify(nome)}`.
pub fn municipality_slug(nome: &str, provincia: &str) -> String {
    format!("{}-{}", provincia.to_uppercase(), slugify(nome))
}

/// `{municipality_slug}-{slugify(nome)}`.
pub fn point_of_interest_slug(municipality_slug: &str, nome: &str) -> String {
    format!("{}-{}", municipality_slug, slugify(nome))
}

/// Tours have no hierarchy: the slug is the slugified name.
pub fn tour_slug(nome: &str) -> String {
    slugify(nome)
}

/// Case-insensitive slug comparison used by every lookup-by-slug.
pub fn slug_matches(stored: &str, requested: &str) -> bool {
    stored.to_lowercase() == requested.to_lowercase()
}

// Combining Diacritical Marks block.
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_clean(slug: &str) -> bool {
        slug.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && !slug.contains("--")
    }

    #[test]
    fn strips_accents_and_punctuation() {
        let slug = slugify("Città, Sant'Àgata!");
        assert_eq!(slug, "citta-santagata");
        assert!(is_clean(&slug));
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify("  Valle   dei \t Templi  "), "valle-dei-templi");
    }

    #[test]
    fn empty_and_symbol_only_inputs_yield_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!?*"), "");
    }

    #[test]
    fn keeps_existing_hyphens() {
        assert_eq!(slugify("Castel-di Tusa"), "castel-di-tusa");
        assert_eq!(slugify("- Erice -"), "erice");
    }

    #[test]
    fn never_doubles_hyphens() {
        assert_eq!(slugify("Isola Bella - Taormina"), "isola-bella-taormina");
        assert_eq!(slugify("Cefalù -- Duomo"), "cefalu-duomo");
    }

    #[test]
    fn is_idempotent() {
        for input in [
            "Città, Sant'Àgata!",
            "Caltagirone",
            "  Noto   Barocca ",
            "Isola Bella - Taormina",
            "Ragusa Ibla #2",
            "",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "input: {input:?}");
            assert!(once.is_empty() || is_clean(&once), "input: {input:?}");
        }
    }

    #[test]
    fn municipality_slug_uppercases_province() {
        assert_eq!(municipality_slug("Enna", "en"), "EN-enna");
        assert_eq!(municipality_slug("Piazza Armerina", "EN"), "EN-piazza-armerina");
    }

    #[test]
    fn point_of_interest_slug_is_hierarchical() {
        let comune = municipality_slug("Agrigento", "AG");
        assert_eq!(
            point_of_interest_slug(&comune, "Valle dei Templi"),
            "AG-agrigento-valle-dei-templi"
        );
    }

    #[test]
    fn tour_slug_is_flat() {
        assert_eq!(tour_slug("Barocco di Val di Noto"), "barocco-di-val-di-noto");
    }

    #[test]
    fn slug_lookup_ignores_case() {
        assert!(slug_matches("EN-enna", "en-enna"));
        assert!(!slug_matches("EN-enna", "en-enna-alta"));
    }
}
