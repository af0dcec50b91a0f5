use serde::Deserialize;
use std::collections::HashMap;

use crate::api_connection::endpoints::{
    FunctionDefinition, JsonSchema, JsonSchemaProperty, ToolDefinition,
};

pub const NUTRITION_TOOL: &str = "get_nutrition_info";
pub const SHOPPING_TOOL: &str = "compare_and_generate_shopping_list";

#[derive(Debug, Deserialize)]
pub struct NutritionToolArgs {
    pub ingredients_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ShoppingToolArgs {
    pub recipe_ingredients: Vec<String>,
    pub available_ingredients: String,
}

pub fn nutrition_tool_definition() -> ToolDefinition {
    let mut properties_map = HashMap::new();
    properties_map.insert(
        "ingredients_text".to_string(),
        JsonSchemaProperty {
            property_type: "string".to_string(),
            description: Some(
                "Comma-separated list of recipe ingredients with quantities.".to_string(),
            ),
            r#enum: None,
            items: None,
        },
    );

    ToolDefinition::function(FunctionDefinition {
        name: NUTRITION_TOOL.to_string(),
        description: Some(
            "Get detailed nutrition information for recipe ingredients".to_string(),
        ),
        parameters: JsonSchema {
            schema_type: "object".to_string(),
            properties: Some(properties_map),
            required: Some(vec!["ingredients_text".to_string()]),
            additional_properties: Some(false),
        },
    })
}

pub fn shopping_tool_definition() -> ToolDefinition {
    let mut properties_map = HashMap::new();
    properties_map.insert(
        "recipe_ingredients".to_string(),
        JsonSchemaProperty {
            property_type: "array".to_string(),
            description: Some(
                "List of ingredients needed for the recipe, each with its quantity.".to_string(),
            ),
            r#enum: None,
            items: Some(Box::new(JsonSchema {
                schema_type: "string".to_string(),
                properties: None,
                required: None,
                additional_properties: None,
            })),
        },
    );
    properties_map.insert(
        "available_ingredients".to_string(),
        JsonSchemaProperty {
            property_type: "string".to_string(),
            description: Some(
                "Comma-separated string of ingredients already in the pantry.".to_string(),
            ),
            r#enum: None,
            items: None,
        },
    );

    ToolDefinition::function(FunctionDefinition {
        name: SHOPPING_TOOL.to_string(),
        description: Some(
            "Compare recipe ingredients with available ingredients and generate a shopping list"
                .to_string(),
        ),
        parameters: JsonSchema {
            schema_type: "object".to_string(),
            properties: Some(properties_map),
            required: Some(vec![
                "recipe_ingredients".to_string(),
                "available_ingredients".to_string(),
            ]),
            additional_properties: Some(false),
        },
    })
}
