//! Mapping of URL slugs to stored record names.
//!
//! Public URLs carry a hyphenated, lowercase form of a product or menu list
//! name. Most names survive the trip back by undoing the hyphenation; the
//! exception table covers names that contain hyphens of their own or whose
//! published slug carries a typo.

/// Slugs whose stored name cannot be recovered by the generic rule.
pub const SLUG_EXCEPTIONS: &[(&str, &str)] = &[
    ("sev-drulo-series", "sev-drulo series"),
    ("sev-drulo-sofa", "sev-drulo sofa"),
    ("sev-drulo-club-chair", "sev-drulo club chair"),
    ("sev-drulo-sectional-sofa", "sev-drulo sectional sofa"),
    ("wall-mount-luggage-rack", "Wall-mount Luggage Rack"),
    ("sev-drulo-ottoman", "sev-drulo ottoman"),
    ("robe-tile-coffe-table", "robe-tile coffee table"),
];

/// Possessive forms dropped by slugification.
const POSSESSIVES: &[(&str, &str)] = &[("captains", "captain's"), ("admirals", "admiral's")];

/// Return the exception-table entry for `slug`, if any. Keys match exactly.
pub fn slug_exception(slug: &str) -> Option<&'static str> {
    SLUG_EXCEPTIONS
        .iter()
        .find(|(key, _)| *key == slug)
        .map(|(_, name)| *name)
}

/// Convert a URL slug into the name used for a case-insensitive lookup.
pub fn normalize_slug(slug: &str) -> String {
    if let Some(name) = slug_exception(slug) {
        return name.to_string();
    }

    let mut name = slug.to_lowercase().replace('-', " ");
    for (plain, possessive) in POSSESSIVES {
        name = name.replace(plain, possessive);
    }
    name
}

/// Case-folded form of a name, stored next to it and used for lookups.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_hyphens_and_lowercases() {
        assert_eq!(normalize_slug("Test-Product"), "test product");
    }

    #[test]
    fn restores_possessives() {
        assert_eq!(normalize_slug("captains-chair"), "captain's chair");
        assert_eq!(normalize_slug("admirals-desk"), "admiral's desk");
    }

    #[test]
    fn possessive_replacement_applies_after_lowercasing() {
        assert_eq!(normalize_slug("CAPTAINS-Bed"), "captain's bed");
    }

    #[test]
    fn exception_table_wins() {
        assert_eq!(
            normalize_slug("wall-mount-luggage-rack"),
            "Wall-mount Luggage Rack"
        );
        assert_eq!(
            normalize_slug("robe-tile-coffe-table"),
            "robe-tile coffee table"
        );
    }

    #[test]
    fn exception_keys_are_case_sensitive() {
        assert_eq!(normalize_slug("Sev-Drulo-Sofa"), "sev drulo sofa");
    }

    #[test]
    fn name_keys_fold_non_ascii_capitals() {
        assert_eq!(name_key("Étagère Bench"), "étagère bench");
        assert_eq!(name_key(&normalize_slug("ÉTAGÈRE-BENCH")), "étagère bench");
    }

    #[test]
    fn every_exception_differs_from_generic_rule() {
        for (slug, name) in SLUG_EXCEPTIONS {
            let generic = slug.to_lowercase().replace('-', " ");
            assert_ne!(generic, *name, "{slug} does not need an exception");
        }
    }
}
