use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::nutrition::NutrientTotals;
use crate::shopping::ShoppingItem;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";
pub const SCHEMA_TYPE: &str = "Recipe";
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/800x600";

/// Dietary restriction → schema.org diet URI. Restrictions without a
/// schema.org diet ("Dairy-free", "Nut-free") are dropped silently.
const DIET_URI_TABLE: &[(&str, &str)] = &[
    ("Vegetarian", "https://schema.org/VegetarianDiet"),
    ("Vegan", "https://schema.org/VeganDiet"),
    ("Gluten-free", "https://schema.org/GlutenFreeDiet"),
    ("Diabetic", "https://schema.org/DiabeticDiet"),
    ("Halal", "https://schema.org/HalalDiet"),
    ("Kosher", "https://schema.org/KosherDiet"),
    ("Low-calorie", "https://schema.org/LowCalorieDiet"),
    ("Low-fat", "https://schema.org/LowFatDiet"),
    ("Low-sodium", "https://schema.org/LowSaltDiet"),
];

pub fn suitable_diets(dietary_restrictions: &[String]) -> Vec<String> {
    dietary_restrictions
        .iter()
        .filter_map(|restriction| {
            DIET_URI_TABLE
                .iter()
                .find(|(name, _)| name == restriction)
                .map(|(_, uri)| uri.to_string())
        })
        .collect()
}

/// Formats minutes as an ISO-8601 duration, e.g. 45 -> "PT45M", 90 -> "PT1H30M".
pub fn iso8601_minutes(minutes: u32) -> String {
    if minutes >= 60 && minutes % 60 == 0 {
        format!("PT{}H", minutes / 60)
    } else if minutes >= 60 {
        format!("PT{}H{}M", minutes / 60, minutes % 60)
    } else {
        format!("PT{}M", minutes)
    }
}

/// Prose fields the generation capability is allowed to produce. Everything
/// reconciled (nutrition, shopping, diets) is overwritten by the pipeline's
/// own computed values afterwards.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub description: String,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(rename = "prepTime", default)]
    pub prep_time: Option<String>,
    #[serde(rename = "cookTime", default)]
    pub cook_time: Option<String>,
    #[serde(rename = "totalTime", default)]
    pub total_time: Option<String>,
    #[serde(rename = "recipeIngredient", default)]
    pub recipe_ingredient: Vec<String>,
    #[serde(rename = "recipeInstructions", default)]
    pub recipe_instructions: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

fn default_author() -> String {
    "AI Chef".to_string()
}

/// The final schema.org-tagged recipe artifact.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecipeDocument {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub doc_type: String,
    pub name: String,
    pub description: String,
    pub author: String,
    pub cuisine: String,
    pub difficulty: String,
    #[serde(rename = "prepTime")]
    pub prep_time: String,
    #[serde(rename = "cookTime")]
    pub cook_time: String,
    #[serde(rename = "totalTime")]
    pub total_time: String,
    #[serde(rename = "recipeYield")]
    pub recipe_yield: String,
    #[serde(rename = "recipeIngredient")]
    pub recipe_ingredient: Vec<String>,
    #[serde(rename = "recipeInstructions")]
    pub recipe_instructions: Vec<String>,
    /// Per-serving nutrition facts, computed or fallback.
    pub nutrition: NutrientTotals,
    #[serde(rename = "suitableForDiet", skip_serializing_if = "Option::is_none")]
    pub suitable_for_diet: Option<Vec<String>>,
    #[serde(rename = "shoppingList")]
    pub shopping_list: Vec<ShoppingItem>,
    #[serde(rename = "availableItems")]
    pub available_items: Vec<ShoppingItem>,
    #[serde(rename = "shoppingByCategory")]
    pub shopping_by_category: BTreeMap<String, Vec<String>>,
    pub keywords: Vec<String>,
    #[serde(rename = "datePublished")]
    pub date_published: String,
    pub image: String,
}
