use anyhow::{anyhow, Context, Result};
use recipe_gen::cli::parse_args;
use recipe_gen::generation::OpenRouterGeneration;
use recipe_gen::nutrition::NutritionClient;
use recipe_gen::pipeline::state::RecipeRequest;
use recipe_gen::pipeline::RecipePipeline;
use tokio::fs;

const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
const NUTRITION_API_KEY_ENV_VAR: &str = "NUTRITION_API_KEY";
const DEFAULT_MODEL: &str = "qwen/qwen3-32b";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env file for API keys

    let cli_args = parse_args();

    let request = RecipeRequest {
        available_ingredients: cli_args.ingredients.clone(),
        dietary_restrictions: cli_args
            .restrictions
            .iter()
            .map(|r| r.as_str().to_string())
            .collect(),
        cuisine: cli_args.cuisine.as_str().to_string(),
        difficulty: cli_args.difficulty.as_str().to_string(),
        servings: cli_args.servings,
        cooking_time_minutes: cli_args.cooking_time,
    };

    let pipeline = RecipePipeline::new(
        Box::new(OpenRouterGeneration::new(API_KEY_ENV_VAR, DEFAULT_MODEL)),
        Box::new(NutritionClient::new(NUTRITION_API_KEY_ENV_VAR)),
    );

    println!("Generating {} recipe for {} servings...", request.cuisine, request.servings);
    let final_state = pipeline.run(request).await;

    if !final_state.errors.is_empty() {
        eprintln!("Warnings during generation:");
        for error in &final_state.errors {
            eprintln!("  - {}", error);
        }
    }

    let recipe = final_state
        .final_recipe
        .ok_or_else(|| anyhow!("Recipe generation produced no document"))?;

    let json = serde_json::to_string_pretty(&recipe)
        .with_context(|| "Failed to serialize recipe document")?;
    fs::write(&cli_args.output, &json)
        .await
        .with_context(|| format!("Failed to write recipe to '{}'", cli_args.output))?;

    println!("\nRecipe saved to: {}", cli_args.output);
    println!("Recipe: {}", recipe.name);
    println!("Servings: {}", recipe.recipe_yield);
    println!("Total Time: {}", recipe.total_time);
    println!("Items to buy: {}", recipe.shopping_list.len());
    println!("Items available: {}", recipe.available_items.len());
    println!("Calories per serving: {}", recipe.nutrition.calories);

    Ok(())
}
