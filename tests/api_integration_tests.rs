use dotenv::dotenv;
use std::env;

use recipe_gen::api_connection::connection::ApiConnectionError;
use recipe_gen::api_connection::endpoints::{
    ChatCompletionRequest, ChatMessage, Provider, OPENROUTER_MODELS,
};
use recipe_gen::generation::{GenerationCapability, GenerationOptions, OpenRouterGeneration};
use recipe_gen::nutrition::{NutritionApiError, NutritionClient};
use recipe_gen::pipeline::tools::nutrition_tool_definition;

const TEST_API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
const TEST_NUTRITION_KEY_ENV_VAR: &str = "NUTRITION_API_KEY";

fn get_cerebras_test_model() -> String {
    OPENROUTER_MODELS
        .iter()
        .find(|m| m.model_source == "cerebras")
        .map(|m| m.model_name.to_string())
        .expect("No Cerebras model found in OPENROUTER_MODELS for testing")
}

fn setup_test_environment() {
    dotenv().ok();
}

#[tokio::test]
async fn test_missing_api_key_error() {
    setup_test_environment();
    let provider = Provider::openrouter("THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ");
    let request = ChatCompletionRequest {
        model: get_cerebras_test_model(),
        messages: vec![ChatMessage::user("Hello")],
        response_format: None,
        tools: None,
        temperature: None,
        max_tokens: None,
    };
    let result = provider.call_chat_completion(request).await;
    assert!(matches!(result, Err(ApiConnectionError::MissingApiKey(_))));
    if let Err(ApiConnectionError::MissingApiKey(key_name)) = result {
        assert_eq!(key_name, "THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ");
    }
}

#[tokio::test]
async fn test_missing_nutrition_api_key_error() {
    setup_test_environment();
    let client = NutritionClient::new("THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ");
    let result = client.lookup("2 cups rice").await;
    assert!(matches!(result, Err(NutritionApiError::MissingApiKey(_))));
}

#[tokio::test]
#[ignore]
async fn test_successful_generation_call() {
    setup_test_environment();
    if env::var(TEST_API_KEY_ENV_VAR).is_err() {
        println!(
            "Skipping test_successful_generation_call: {} not set.",
            TEST_API_KEY_ENV_VAR
        );
        return;
    }

    let capability = OpenRouterGeneration::new(TEST_API_KEY_ENV_VAR, &get_cerebras_test_model());
    let outcome = capability
        .invoke(
            vec![ChatMessage::user(
                "What is the capital of France? Respond concisely.",
            )],
            &[],
            GenerationOptions {
                temperature: Some(0.7),
                max_tokens: Some(100),
                response_format: None,
            },
        )
        .await;

    let outcome = outcome.expect("API call failed");
    assert!(outcome.text.to_lowercase().contains("paris"));
    assert!(outcome.requested_calls.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_generation_call_with_tool_declaration() {
    setup_test_environment();
    if env::var(TEST_API_KEY_ENV_VAR).is_err() {
        println!(
            "Skipping test_generation_call_with_tool_declaration: {} not set.",
            TEST_API_KEY_ENV_VAR
        );
        return;
    }

    let capability = OpenRouterGeneration::new(TEST_API_KEY_ENV_VAR, &get_cerebras_test_model());
    let outcome = capability
        .invoke(
            vec![
                ChatMessage::system(
                    "You MUST call the get_nutrition_info tool for the user's ingredients.",
                ),
                ChatMessage::user("Get nutrition info for: 2 cups rice, 1 lb chicken breast"),
            ],
            &[nutrition_tool_definition()],
            GenerationOptions {
                temperature: Some(0.0),
                max_tokens: Some(500),
                response_format: None,
            },
        )
        .await;

    let outcome = outcome.expect("API call failed");
    assert!(
        outcome
            .requested_calls
            .iter()
            .any(|c| c.name == "get_nutrition_info"),
        "expected a nutrition tool call, got: {:?}",
        outcome.requested_calls
    );
}

#[tokio::test]
#[ignore]
async fn test_live_nutrition_lookup() {
    setup_test_environment();
    if env::var(TEST_NUTRITION_KEY_ENV_VAR).is_err() {
        println!(
            "Skipping test_live_nutrition_lookup: {} not set.",
            TEST_NUTRITION_KEY_ENV_VAR
        );
        return;
    }

    let client = NutritionClient::new(TEST_NUTRITION_KEY_ENV_VAR);
    let items = client
        .lookup("2 cups rice, 1 lb chicken breast")
        .await
        .expect("Nutrition lookup failed");
    assert!(!items.is_empty());
}
