/// Unit, quantity and size words stripped when reducing an ingredient phrase
/// to its core name.
const STOP_WORDS: &[&str] = &[
    "cup",
    "cups",
    "tablespoon",
    "tablespoons",
    "tbsp",
    "tsp",
    "teaspoon",
    "teaspoons",
    "oz",
    "lb",
    "lbs",
    "gram",
    "grams",
    "g",
    "kg",
    "ml",
    "l",
    "liter",
    "liters",
    "piece",
    "pieces",
    "pcs",
    "of",
    "medium",
    "large",
    "small",
    "fresh",
    "dried",
];

// A token counts as numeric when removing dots leaves only digits, so both
// "2" and "1.5" are dropped but "1/2" is kept.
fn is_numeric_token(token: &str) -> bool {
    let stripped: String = token.chars().filter(|&c| c != '.').collect();
    !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit())
}

/// Reduces a phrase like "2 cups basmati rice" to its core noun(s)
/// ("basmati rice"). Never returns an empty string: when every token is a
/// quantity or unit word, the lowercased original phrase is returned as-is.
pub fn extract_core_name(phrase: &str) -> String {
    let lowered = phrase.to_lowercase();
    let kept: Vec<&str> = lowered
        .split_whitespace()
        .filter(|w| !is_numeric_token(w) && !STOP_WORDS.contains(w))
        .collect();

    if kept.is_empty() {
        lowered
    } else {
        kept.join(" ")
    }
}

/// Whether a recipe ingredient is covered by the pantry. Matching is
/// whole-string bidirectional substring containment between core names, so
/// short names can over-match ("egg" inside "eggplant") — kept deliberately,
/// the reconciliation report documents what the matcher decided.
pub fn is_available(recipe_ingredient: &str, available_list: &[String]) -> bool {
    let core = extract_core_name(recipe_ingredient);
    available_list.iter().any(|entry| {
        let entry_core = extract_core_name(entry);
        core.contains(&entry_core) || entry_core.contains(&core)
    })
}

/// Splits pantry text on commas into trimmed, lowercased entries. Empty
/// entries from trailing or doubled commas are dropped so they can never
/// match everything via empty-substring containment.
pub fn split_available_list(available_ingredients_text: &str) -> Vec<String> {
    available_ingredients_text
        .split(',')
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_quantities_and_units() {
        assert_eq!(extract_core_name("2 cups rice"), "rice");
        assert_eq!(extract_core_name("1 lb chicken breast"), "chicken breast");
        assert_eq!(extract_core_name("1.5 kg fresh tomatoes"), "tomatoes");
        assert_eq!(extract_core_name("3 large eggs"), "eggs");
    }

    #[test]
    fn keeps_fraction_tokens() {
        // "1/2" is not purely numeric, so it survives stripping.
        assert_eq!(extract_core_name("1/2 cup sugar"), "1/2 sugar");
    }

    #[test]
    fn falls_back_to_original_when_everything_is_stripped() {
        assert_eq!(extract_core_name("2 cups"), "2 cups");
        assert_eq!(extract_core_name("LARGE"), "large");
    }

    #[test]
    fn never_returns_empty() {
        for phrase in ["2 cups", "1", "of", "  3.5  ", "tbsp tsp"] {
            assert!(!extract_core_name(phrase).is_empty(), "phrase: {phrase:?}");
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        for phrase in [
            "2 cups rice",
            "1 lb chicken breast",
            "fresh garlic",
            "3 medium onions",
            "olive oil",
        ] {
            let once = extract_core_name(phrase);
            assert_eq!(extract_core_name(&once), once);
        }
    }

    #[test]
    fn matches_bidirectionally() {
        let available = split_available_list("rice, onions, garlic");
        assert!(is_available("2 cups rice", &available));
        assert!(is_available("1 red onions", &available));
        assert!(!is_available("1 lb chicken breast", &available));
    }

    #[test]
    fn pantry_entries_are_core_named_too() {
        let available = split_available_list("2 cups basmati rice");
        assert!(is_available("basmati rice", &available));
    }

    #[test]
    fn short_names_overmatch_by_design() {
        // Documented substring behavior: "egg" matches inside "eggplant".
        let available = split_available_list("eggplant");
        assert!(is_available("2 egg", &available));
    }

    #[test]
    fn empty_pantry_entries_are_dropped() {
        let available = split_available_list("rice,, onions, ");
        assert_eq!(available, vec!["rice".to_string(), "onions".to_string()]);
        assert!(!is_available("1 lb chicken breast", &available));
    }

    #[test]
    fn empty_pantry_matches_nothing() {
        let available = split_available_list("");
        assert!(available.is_empty());
        assert!(!is_available("2 cups rice", &available));
    }
}
