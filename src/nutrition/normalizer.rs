// ABOUTME: Classifier label normalization into lookup keys
// ABOUTME: Lower-cases a raw label and collapses whitespace runs into underscores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Turn a raw classifier label into a lookup key
///
/// Lower-cases the input and replaces every run of whitespace (leading and
/// trailing runs included) with a single `_`. Never fails; an empty label
/// yields an empty key, and applying it twice changes nothing.
///
/// ```
/// use food_scan::nutrition::normalize;
///
/// assert_eq!(normalize("Beef  Tartare"), "beef_tartare");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(raw_label: &str) -> String {
    let mut key = String::with_capacity(raw_label.len());
    let mut in_whitespace = false;

    for ch in raw_label.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                key.push('_');
                in_whitespace = true;
            }
        } else {
            key.push(ch);
            in_whitespace = false;
        }
    }

    key
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn test_lowercases_and_joins_words() {
        assert_eq!(normalize("Apple Pie"), "apple_pie");
        assert_eq!(normalize("SPAGHETTI CARBONARA"), "spaghetti_carbonara");
    }

    #[test]
    fn test_collapses_mixed_whitespace_runs() {
        assert_eq!(normalize("fish \t and\n\nchips"), "fish_and_chips");
    }

    #[test]
    fn test_edge_whitespace_becomes_underscore() {
        assert_eq!(normalize("  ramen "), "_ramen_");
    }

    #[test]
    fn test_existing_underscores_kept() {
        assert_eq!(normalize("french_fries"), "french_fries");
    }

    #[test]
    fn test_idempotent() {
        for label in ["Hot Dog", "  Pad  Thai ", "", "ice_cream", "Crème Brûlée"] {
            let once = normalize(label);
            assert_eq!(normalize(&once), once, "label {label:?}");
        }
    }
}
