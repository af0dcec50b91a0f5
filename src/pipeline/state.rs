use serde::Serialize;

use crate::nutrition::NutritionData;
use crate::recipe_document::RecipeDocument;
use crate::shopping::ShoppingReport;

/// Advisory marker of the last stage that ran; observability only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Start,
    Planning,
    Shopping,
    Structuring,
}

/// Validated pipeline input. Enum and range validation happens at the
/// hosting boundary (CLI) before a request is constructed.
#[derive(Debug, Clone)]
pub struct RecipeRequest {
    pub available_ingredients: String,
    pub dietary_restrictions: Vec<String>,
    pub cuisine: String,
    pub difficulty: String,
    pub servings: u32,
    pub cooking_time_minutes: u32,
}

/// The single record threaded through the three stages. Each stage receives
/// the current state and returns a new one with exactly its own fields set;
/// every optional field transitions from unset to set at most once, in
/// stage order. `errors` is append-only and never aborts the run.
#[derive(Debug, Clone)]
pub struct PipelineState {
    pub available_ingredients: String,
    pub dietary_restrictions: Vec<String>,
    pub cuisine: String,
    pub difficulty: String,
    pub servings: u32,
    pub cooking_time_minutes: u32,
    pub recipe_plan: Option<String>,
    pub nutrition_data: Option<NutritionData>,
    pub shopping_data: Option<ShoppingReport>,
    pub final_recipe: Option<RecipeDocument>,
    pub errors: Vec<String>,
    pub current_stage: Stage,
}

impl PipelineState {
    pub fn new(request: RecipeRequest) -> Self {
        Self {
            available_ingredients: request.available_ingredients,
            dietary_restrictions: request.dietary_restrictions,
            cuisine: request.cuisine,
            difficulty: request.difficulty,
            servings: request.servings.max(1),
            cooking_time_minutes: request.cooking_time_minutes.max(1),
            recipe_plan: None,
            nutrition_data: None,
            shopping_data: None,
            final_recipe: None,
            errors: Vec::new(),
            current_stage: Stage::Start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_unset() {
        let state = PipelineState::new(RecipeRequest {
            available_ingredients: "rice, beans".to_string(),
            dietary_restrictions: vec!["Vegan".to_string()],
            cuisine: "Mexican".to_string(),
            difficulty: "Easy".to_string(),
            servings: 4,
            cooking_time_minutes: 30,
        });
        assert_eq!(state.current_stage, Stage::Start);
        assert!(state.recipe_plan.is_none());
        assert!(state.nutrition_data.is_none());
        assert!(state.shopping_data.is_none());
        assert!(state.final_recipe.is_none());
        assert!(state.errors.is_empty());
    }

    #[test]
    fn zero_counts_are_clamped_to_one() {
        let state = PipelineState::new(RecipeRequest {
            available_ingredients: String::new(),
            dietary_restrictions: vec![],
            cuisine: "Thai".to_string(),
            difficulty: "Hard".to_string(),
            servings: 0,
            cooking_time_minutes: 0,
        });
        assert_eq!(state.servings, 1);
        assert_eq!(state.cooking_time_minutes, 1);
    }
}
