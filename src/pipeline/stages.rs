use std::collections::HashMap;

use crate::api_connection::connection::strip_markdown_fences;
use crate::api_connection::endpoints::{
    ChatMessage, JsonSchema, JsonSchemaDefinition, JsonSchemaProperty, ResponseFormat,
};
use crate::generation::{GenerationCapability, GenerationOptions};
use crate::nutrition::{self, NutritionLookup};
use crate::recipe_document::{
    iso8601_minutes, suitable_diets, RecipeDocument, RecipeDraft, PLACEHOLDER_IMAGE,
    SCHEMA_CONTEXT, SCHEMA_TYPE,
};
use crate::pipeline::state::{PipelineState, Stage};
use crate::pipeline::tools::{
    nutrition_tool_definition, shopping_tool_definition, NutritionToolArgs, ShoppingToolArgs,
    NUTRITION_TOOL, SHOPPING_TOOL,
};
use crate::shopping::{self, ShoppingReport};

/// Planning stage: drafts the recipe plan and executes a requested nutrition
/// lookup. Sets `recipe_plan` and (when the tool was invoked) `nutrition_data`.
pub async fn planning_stage(
    mut state: PipelineState,
    capability: &dyn GenerationCapability,
    nutrition_lookup: &dyn NutritionLookup,
) -> PipelineState {
    let system_message = ChatMessage::system(
        "You are a professional chef and recipe planner.\n\
         Your tasks:\n\
         1. Analyze available ingredients and create a recipe concept\n\
         2. List the exact ingredients needed with quantities\n\
         3. Call the get_nutrition_info tool with the ingredients list\n\
         4. Create a basic recipe plan with cooking steps\n\
         Be specific with ingredient quantities and make sure they are realistic for the given servings.",
    );
    let user_message = ChatMessage::user(format!(
        "Create a recipe plan with these requirements:\n\n\
         Available Ingredients: {}\n\
         Dietary Restrictions: {}\n\
         Cuisine: {}\n\
         Difficulty: {}\n\
         Servings: {}\n\
         Target Cooking Time: {} minutes\n\n\
         List all ingredients with precise quantities and use the get_nutrition_info tool to get nutritional data.",
        state.available_ingredients,
        state.dietary_restrictions.join(", "),
        state.cuisine,
        state.difficulty,
        state.servings,
        state.cooking_time_minutes
    ));

    let tools = [nutrition_tool_definition()];
    let options = GenerationOptions {
        temperature: Some(0.7),
        max_tokens: Some(2048),
        response_format: None,
    };

    match capability
        .invoke(vec![system_message, user_message], &tools, options)
        .await
    {
        Ok(outcome) => {
            let mut requested_lookup = false;
            for call in &outcome.requested_calls {
                if call.name == NUTRITION_TOOL {
                    requested_lookup = true;
                    match serde_json::from_value::<NutritionToolArgs>(call.arguments.clone()) {
                        Ok(args) => {
                            let data = nutrition_lookup.fetch_totals(&args.ingredients_text).await;
                            if let Some(message) = &data.message {
                                state.errors.push(format!("Nutrition lookup: {}", message));
                            }
                            state.nutrition_data = Some(data);
                        }
                        Err(e) => {
                            state
                                .errors
                                .push(format!("Invalid nutrition tool arguments: {}", e));
                        }
                    }
                }
            }
            if !requested_lookup {
                state
                    .errors
                    .push("Planning agent did not request nutrition lookup".to_string());
            }
            state.recipe_plan = Some(outcome.text);
        }
        Err(e) => {
            state.errors.push(format!("Planning agent failed: {}", e));
            state.recipe_plan = Some(String::new());
        }
    }

    state.current_stage = Stage::Planning;
    state
}

/// Shopping stage: asks the capability to extract ingredients from the plan
/// and invoke the shopping-list tool; the tool itself is executed here.
/// Always sets `shopping_data`, falling back to an empty report.
pub async fn shopping_stage(
    mut state: PipelineState,
    capability: &dyn GenerationCapability,
) -> PipelineState {
    let recipe_plan = state.recipe_plan.clone().unwrap_or_default();

    let system_message = ChatMessage::system(
        "You are a shopping list expert and pantry management specialist.\n\
         Extract ALL ingredients from the recipe plan with their exact quantities, then\n\
         call the compare_and_generate_shopping_list tool with:\n\
         - recipe_ingredients: a list of strings, each one ingredient with its quantity\n\
         - available_ingredients: the exact string of available ingredients provided",
    );
    let user_message = ChatMessage::user(format!(
        "Based on this recipe plan, create a shopping list:\n\n\
         Recipe Plan:\n{}\n\n\
         Available Ingredients in Pantry:\n{}\n\n\
         Extract all ingredients with quantities and call compare_and_generate_shopping_list.",
        recipe_plan, state.available_ingredients
    ));

    let tools = [shopping_tool_definition()];
    let options = GenerationOptions {
        temperature: Some(0.5),
        max_tokens: Some(2048),
        response_format: None,
    };

    let mut shopping_data: Option<ShoppingReport> = None;
    match capability
        .invoke(vec![system_message, user_message], &tools, options)
        .await
    {
        Ok(outcome) => {
            for call in &outcome.requested_calls {
                if call.name == SHOPPING_TOOL {
                    match serde_json::from_value::<ShoppingToolArgs>(call.arguments.clone()) {
                        Ok(args) => {
                            shopping_data = Some(shopping::build(
                                &args.recipe_ingredients,
                                &args.available_ingredients,
                            ));
                        }
                        Err(e) => {
                            state
                                .errors
                                .push(format!("Invalid shopping tool arguments: {}", e));
                        }
                    }
                }
            }
            if shopping_data.is_none() {
                state
                    .errors
                    .push("Shopping agent did not call comparison tool".to_string());
            }
        }
        Err(e) => {
            state.errors.push(format!("Shopping agent failed: {}", e));
        }
    }

    // Processing continues regardless; an empty report keeps the invariants.
    state.shopping_data = Some(shopping_data.unwrap_or_default());
    state.current_stage = Stage::Shopping;
    state
}

fn get_recipe_draft_json_schema() -> JsonSchemaDefinition {
    let string_property = |description: &str| JsonSchemaProperty {
        property_type: "string".to_string(),
        description: Some(description.to_string()),
        r#enum: None,
        items: None,
    };
    let string_array_property = |description: &str| JsonSchemaProperty {
        property_type: "array".to_string(),
        description: Some(description.to_string()),
        r#enum: None,
        items: Some(Box::new(JsonSchema {
            schema_type: "string".to_string(),
            properties: None,
            required: None,
            additional_properties: None,
        })),
    };

    let mut properties_map = HashMap::new();
    properties_map.insert(
        "name".to_string(),
        string_property("Creative, descriptive recipe name."),
    );
    properties_map.insert(
        "description".to_string(),
        string_property("Appealing one-paragraph description of the dish."),
    );
    properties_map.insert(
        "author".to_string(),
        string_property("Recipe author or chef name."),
    );
    properties_map.insert(
        "prepTime".to_string(),
        string_property("Preparation time in ISO 8601 duration format, e.g. PT15M."),
    );
    properties_map.insert(
        "cookTime".to_string(),
        string_property("Cooking time in ISO 8601 duration format, e.g. PT30M."),
    );
    properties_map.insert(
        "totalTime".to_string(),
        string_property("Total time in ISO 8601 duration format."),
    );
    properties_map.insert(
        "recipeIngredient".to_string(),
        string_array_property("All ingredients, each with its exact quantity."),
    );
    properties_map.insert(
        "recipeInstructions".to_string(),
        string_array_property("Clear step-by-step cooking instructions."),
    );
    properties_map.insert(
        "keywords".to_string(),
        string_array_property("Recipe keywords for searchability."),
    );

    JsonSchemaDefinition {
        name: "recipe_draft_schema".to_string(),
        strict: Some(true),
        schema: JsonSchema {
            schema_type: "object".to_string(),
            properties: Some(properties_map),
            required: Some(vec![
                "name".to_string(),
                "description".to_string(),
                "recipeIngredient".to_string(),
                "recipeInstructions".to_string(),
            ]),
            additional_properties: Some(false),
        },
    }
}

/// Structuring stage: computes per-serving nutrition (fallback rule applies),
/// maps dietary restrictions to diet URIs, asks the capability for the prose
/// fields, then overwrites every reconciled field with the pipeline's own
/// values. The only fatal case: when no conforming draft can be obtained,
/// `final_recipe` stays unset and a diagnostic is appended.
pub async fn structuring_stage(
    mut state: PipelineState,
    capability: &dyn GenerationCapability,
) -> PipelineState {
    state.current_stage = Stage::Structuring;

    let per_serving = match &state.nutrition_data {
        Some(data) if data.success => nutrition::per_serving(&data.totals, state.servings),
        _ => nutrition::fallback_per_serving(),
    };
    let shopping_data = state.shopping_data.clone().unwrap_or_default();
    let diets = suitable_diets(&state.dietary_restrictions);
    let recipe_plan = state.recipe_plan.clone().unwrap_or_default();

    let system_message = ChatMessage::system(
        "You are a recipe documentation specialist.\n\
         Create a complete, properly structured recipe following the schema.org Recipe format.\n\
         Use ISO 8601 duration format for times (PT15M for 15 minutes, PT1H30M for 1.5 hours).\n\
         Ensure all ingredients have quantities and instructions are clear, numbered steps.\n\
         Respond ONLY with a JSON object adhering to the provided schema.",
    );
    let user_message = ChatMessage::user(format!(
        "Create the final structured recipe:\n\n\
         RECIPE PLAN:\n{}\n\n\
         NUTRITION (per serving):\n{}\n\n\
         REQUIREMENTS:\n\
         - Cuisine: {}\n\
         - Difficulty: {}\n\
         - Servings: {}\n\
         - Cooking Time: {} minutes\n\
         - Dietary Restrictions: {}\n\n\
         Generate the recipe name, description, ingredient list with exact quantities,\n\
         step-by-step instructions, ISO 8601 times, and relevant keywords.",
        recipe_plan,
        serde_json::to_string_pretty(&per_serving).unwrap_or_default(),
        state.cuisine,
        state.difficulty,
        state.servings,
        state.cooking_time_minutes,
        state.dietary_restrictions.join(", ")
    ));

    let options = GenerationOptions {
        temperature: Some(0.1),
        max_tokens: Some(4096),
        response_format: Some(ResponseFormat {
            format_type: "json_schema".to_string(),
            json_schema: Some(get_recipe_draft_json_schema()),
        }),
    };

    let outcome = match capability
        .invoke(vec![system_message, user_message], &[], options)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            state.errors.push(format!("Structuring error: {}", e));
            return state;
        }
    };

    let content = strip_markdown_fences(&outcome.text);
    let draft: RecipeDraft = match serde_json::from_str(&content) {
        Ok(draft) => draft,
        Err(e) => {
            state
                .errors
                .push(format!("Structuring error: failed to parse draft: {}", e));
            return state;
        }
    };

    // Prose comes from the draft; every reconciled field is the pipeline's own.
    let half_time = state.cooking_time_minutes / 2;
    let document = RecipeDocument {
        context: SCHEMA_CONTEXT.to_string(),
        doc_type: SCHEMA_TYPE.to_string(),
        name: draft.name,
        description: draft.description,
        author: draft.author,
        cuisine: state.cuisine.clone(),
        difficulty: state.difficulty.clone(),
        prep_time: draft
            .prep_time
            .unwrap_or_else(|| iso8601_minutes(half_time.max(1))),
        cook_time: draft
            .cook_time
            .unwrap_or_else(|| iso8601_minutes(half_time.max(1))),
        total_time: draft
            .total_time
            .unwrap_or_else(|| iso8601_minutes(state.cooking_time_minutes)),
        recipe_yield: state.servings.to_string(),
        recipe_ingredient: draft.recipe_ingredient,
        recipe_instructions: draft.recipe_instructions,
        nutrition: per_serving,
        suitable_for_diet: if diets.is_empty() { None } else { Some(diets) },
        shopping_list: shopping_data.items_to_purchase,
        available_items: shopping_data.items_available,
        shopping_by_category: shopping_data.shopping_by_category,
        keywords: if draft.keywords.is_empty() {
            vec![state.cuisine.clone(), state.difficulty.clone()]
        } else {
            draft.keywords
        },
        date_published: chrono::Local::now().format("%Y-%m-%d").to_string(),
        image: PLACEHOLDER_IMAGE.to_string(),
    };

    state.final_recipe = Some(document);
    state
}
