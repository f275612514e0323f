//! City name correction against a compiled-in table of Swedish cities.
//!
//! Lookup keys are accent-folded, lowercased and letters-only, so
//! `"Göteborg"`, `"goteborg"`, `"GOTE-BORG"` and the lossy `"G?teborg"` all
//! share one key. Every canonical name also maps from its own key, which
//! makes normalization idempotent.

use std::collections::HashMap;
use std::sync::LazyLock;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::name::push_upper;

/// Canonical city names.
pub const CANONICAL_CITIES: &[&str] = &[
    "Stockholm",
    "Göteborg",
    "Malmö",
    "Uppsala",
    "Västerås",
    "Örebro",
    "Linköping",
    "Helsingborg",
    "Jönköping",
    "Norrköping",
    "Lund",
    "Umeå",
    "Gävle",
    "Borås",
    "Södertälje",
    "Eskilstuna",
    "Halmstad",
    "Växjö",
    "Karlstad",
    "Sundsvall",
    "Luleå",
    "Trollhättan",
    "Östersund",
    "Borlänge",
    "Falun",
    "Kalmar",
    "Kristianstad",
    "Skövde",
];

/// Known misspellings, exonyms and lossy renderings, keyed as [`city_key`]
/// would produce them.
pub const CITY_VARIANTS: &[(&str, &str)] = &[
    ("sthlm", "Stockholm"),
    ("stockholms", "Stockholm"),
    ("stokholm", "Stockholm"),
    ("gothenburg", "Göteborg"),
    ("goeteborg", "Göteborg"),
    ("gbg", "Göteborg"),
    ("gteborg", "Göteborg"),
    ("gotheborg", "Göteborg"),
    ("malmoe", "Malmö"),
    ("malm", "Malmö"),
    ("upsala", "Uppsala"),
    ("vaesteraas", "Västerås"),
    ("vsters", "Västerås"),
    ("oerebro", "Örebro"),
    ("rebro", "Örebro"),
    ("linkoeping", "Linköping"),
    ("linkping", "Linköping"),
    ("joenkoeping", "Jönköping"),
    ("jnkping", "Jönköping"),
    ("norrkoeping", "Norrköping"),
    ("norrkping", "Norrköping"),
    ("umeaa", "Umeå"),
    ("ume", "Umeå"),
    ("gaevle", "Gävle"),
    ("gvle", "Gävle"),
    ("boraas", "Borås"),
    ("bors", "Borås"),
    ("vaexjoe", "Växjö"),
    ("vxj", "Växjö"),
    ("luleaa", "Luleå"),
    ("lule", "Luleå"),
];

/// Lookup key to canonical city name. Built once, never mutated.
pub static CITY_LOOKUP: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for &canonical in CANONICAL_CITIES {
        map.insert(city_key(canonical), canonical);
    }
    for &(variant, canonical) in CITY_VARIANTS {
        map.insert(variant.to_string(), canonical);
    }
    map
});

/// Accent-folded, lowercased, letters-only lookup key.
pub fn city_key(value: &str) -> String {
    value
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Canonical name for `value`, if the table knows it.
pub fn lookup_city(value: &str) -> Option<&'static str> {
    let key = city_key(value);
    if key.is_empty() {
        return None;
    }
    CITY_LOOKUP.get(&key).copied()
}

/// Replace known variants with their canonical name; title-case the rest.
pub fn normalize_city(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match lookup_city(trimmed) {
        Some(canonical) => canonical.to_string(),
        None => title_case(trimmed),
    }
}

/// Uppercase the first letter of every word (split on whitespace and
/// hyphens), lowercase the rest.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut word_start = true;
    for ch in value.split_whitespace().collect::<Vec<_>>().join(" ").chars() {
        if word_start {
            push_upper(&mut out, ch);
        } else {
            out.extend(ch.to_lowercase());
        }
        word_start = ch.is_whitespace() || ch == '-';
    }
    out
}
