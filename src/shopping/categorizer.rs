/// Ordered category table. Order is significant: the first category whose
/// keyword appears as a substring of the phrase wins, which keeps phrases
/// spanning categories ("tomato sauce") deterministic.
const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    (
        "Produce",
        &["tomato", "onion", "garlic", "potato", "vegetable", "fruit"],
    ),
    ("Grains", &["rice", "flour", "pasta", "wheat", "bread"]),
    ("Dairy", &["milk", "butter", "cheese", "yogurt", "cream"]),
    (
        "Proteins",
        &["egg", "chicken", "meat", "fish", "tofu", "beans"],
    ),
    (
        "Spices",
        &["pepper", "salt", "turmeric", "cumin", "spice", "herb"],
    ),
    (
        "Oils & Condiments",
        &["oil", "vinegar", "sauce", "condiment"],
    ),
];

pub const DEFAULT_CATEGORY: &str = "Other";

/// Assigns a shopping category to an ingredient phrase. Total: always returns
/// a category, defaulting to "Other".
pub fn categorize(ingredient_phrase: &str) -> &'static str {
    let lowered = ingredient_phrase.to_lowercase();
    for (category, keywords) in CATEGORY_TABLE {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return category;
        }
    }
    DEFAULT_CATEGORY
}
