pub mod stages;
pub mod state;
pub mod tools;

use crate::generation::GenerationCapability;
use crate::nutrition::NutritionLookup;
use crate::pipeline::state::{PipelineState, RecipeRequest};

/// Runs the linear planning -> shopping -> structuring sequence. Stages never
/// raise past their own boundary; the caller inspects `final_recipe` (None
/// means structuring failed) alongside the accumulated `errors`.
pub struct RecipePipeline {
    capability: Box<dyn GenerationCapability>,
    nutrition_lookup: Box<dyn NutritionLookup>,
}

impl RecipePipeline {
    pub fn new(
        capability: Box<dyn GenerationCapability>,
        nutrition_lookup: Box<dyn NutritionLookup>,
    ) -> Self {
        Self {
            capability,
            nutrition_lookup,
        }
    }

    pub async fn run(&self, request: RecipeRequest) -> PipelineState {
        let state = PipelineState::new(request);
        let state = stages::planning_stage(
            state,
            self.capability.as_ref(),
            self.nutrition_lookup.as_ref(),
        )
        .await;
        let state = stages::shopping_stage(state, self.capability.as_ref()).await;
        stages::structuring_stage(state, self.capability.as_ref()).await
    }
}
