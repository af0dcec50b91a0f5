pub mod categorizer;
pub mod matcher;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Available,
    NeedToPurchase,
}

/// One reconciled ingredient: the original phrase with quantity, its shopping
/// category, and whether the pantry already covers it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ShoppingItem {
    pub item: String,
    pub category: String,
    pub status: ItemStatus,
}

/// Full reconciliation of recipe ingredients against the pantry.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ShoppingReport {
    pub items_to_purchase: Vec<ShoppingItem>,
    pub items_available: Vec<ShoppingItem>,
    pub shopping_by_category: BTreeMap<String, Vec<String>>,
    pub total_items_needed: usize,
    pub items_to_buy: usize,
    pub items_in_stock: usize,
}

/// Compares recipe ingredients with the comma-separated pantry text and
/// partitions them into purchase/available lists, preserving input order.
/// Pure function of its two inputs; no I/O.
pub fn build(recipe_ingredients: &[String], available_ingredients_text: &str) -> ShoppingReport {
    let available_list = matcher::split_available_list(available_ingredients_text);

    let mut items_to_purchase = Vec::new();
    let mut items_available = Vec::new();

    for ingredient in recipe_ingredients {
        let category = categorizer::categorize(ingredient).to_string();
        if matcher::is_available(ingredient, &available_list) {
            items_available.push(ShoppingItem {
                item: ingredient.clone(),
                category,
                status: ItemStatus::Available,
            });
        } else {
            items_to_purchase.push(ShoppingItem {
                item: ingredient.clone(),
                category,
                status: ItemStatus::NeedToPurchase,
            });
        }
    }

    let mut shopping_by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for item in &items_to_purchase {
        shopping_by_category
            .entry(item.category.clone())
            .or_default()
            .push(item.item.clone());
    }

    ShoppingReport {
        total_items_needed: recipe_ingredients.len(),
        items_to_buy: items_to_purchase.len(),
        items_in_stock: items_available.len(),
        items_to_purchase,
        items_available,
        shopping_by_category,
    }
}
