use async_trait::async_trait;
use dotenv::dotenv;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::fmt;

use crate::api_connection::connection::REQUEST_TIMEOUT;

const NUTRITION_API_URL: &str = "https://api.calorieninjas.com/v1/nutrition";

#[derive(Debug)]
pub enum NutritionApiError {
    MissingApiKey(String),
    NetworkError(reqwest::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
}

impl fmt::Display for NutritionApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NutritionApiError::MissingApiKey(key_name) => {
                write!(f, "Nutrition API key not found in environment: {}", key_name)
            }
            NutritionApiError::NetworkError(err) => write!(f, "Network error: {}", err),
            NutritionApiError::ApiError { status, error_body } => {
                write!(f, "Nutrition API error {}: {}", status, error_body)
            }
        }
    }
}

impl Error for NutritionApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NutritionApiError::NetworkError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NutritionApiError {
    fn from(err: reqwest::Error) -> Self {
        NutritionApiError::NetworkError(err)
    }
}

/// One per-item record from the lookup service. Any field may be absent;
/// absent values count as zero when aggregating.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NutritionItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub fat_total_g: Option<f64>,
    #[serde(default)]
    pub carbohydrates_total_g: Option<f64>,
    #[serde(default)]
    pub fiber_g: Option<f64>,
    #[serde(default)]
    pub sugar_g: Option<f64>,
    #[serde(default)]
    pub sodium_mg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct NutritionLookupResponse {
    #[serde(default)]
    items: Vec<NutritionItem>,
}

/// The seven tracked nutrients, summed across items or divided per serving.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_total_g: f64,
    pub carbohydrates_total_g: f64,
    pub fiber_g: f64,
    pub sugar_g: f64,
    pub sodium_mg: f64,
}

/// Aggregated lookup result stored on the pipeline state. `success: false`
/// means the structuring stage must substitute [`fallback_per_serving`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NutritionData {
    pub success: bool,
    pub totals: NutrientTotals,
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Fixed per-serving record substituted when the live lookup fails.
pub fn fallback_per_serving() -> NutrientTotals {
    NutrientTotals {
        calories: 350.0,
        protein_g: 15.0,
        fat_total_g: 12.0,
        carbohydrates_total_g: 45.0,
        fiber_g: 5.0,
        sugar_g: 3.0,
        sodium_mg: 400.0,
    }
}

/// Sums the tracked nutrients across items, treating missing fields as zero.
pub fn aggregate(items: &[NutritionItem]) -> NutritionData {
    let mut totals = NutrientTotals::default();
    for item in items {
        totals.calories += item.calories.unwrap_or(0.0);
        totals.protein_g += item.protein_g.unwrap_or(0.0);
        totals.fat_total_g += item.fat_total_g.unwrap_or(0.0);
        totals.carbohydrates_total_g += item.carbohydrates_total_g.unwrap_or(0.0);
        totals.fiber_g += item.fiber_g.unwrap_or(0.0);
        totals.sugar_g += item.sugar_g.unwrap_or(0.0);
        totals.sodium_mg += item.sodium_mg.unwrap_or(0.0);
    }
    NutritionData {
        success: true,
        totals,
        item_count: items.len(),
        message: None,
    }
}

fn round2(value: f64) -> f64 {
    // Half away from zero, the f64::round convention; pinned by tests below.
    (value * 100.0).round() / 100.0
}

/// Divides every nutrient by the serving count, rounded to 2 decimal places.
pub fn per_serving(totals: &NutrientTotals, servings: u32) -> NutrientTotals {
    let s = f64::from(servings.max(1));
    NutrientTotals {
        calories: round2(totals.calories / s),
        protein_g: round2(totals.protein_g / s),
        fat_total_g: round2(totals.fat_total_g / s),
        carbohydrates_total_g: round2(totals.carbohydrates_total_g / s),
        fiber_g: round2(totals.fiber_g / s),
        sugar_g: round2(totals.sugar_g / s),
        sodium_mg: round2(totals.sodium_mg / s),
    }
}

/// Seam for the external nutrition lookup, so stages can be exercised with
/// stubbed collaborators. Implementations never propagate failures; they
/// degrade to `success: false` and the caller substitutes the fallback.
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    async fn fetch_totals(&self, ingredients_text: &str) -> NutritionData;
}

/// Client for the CalorieNinjas nutrition lookup service.
pub struct NutritionClient {
    api_key_env_var: String,
}

impl NutritionClient {
    pub fn new(api_key_env_var: &str) -> Self {
        dotenv().ok();
        Self {
            api_key_env_var: api_key_env_var.to_string(),
        }
    }

    pub async fn lookup(
        &self,
        ingredients_text: &str,
    ) -> Result<Vec<NutritionItem>, NutritionApiError> {
        let api_key = env::var(&self.api_key_env_var)
            .map_err(|_| NutritionApiError::MissingApiKey(self.api_key_env_var.clone()))?;

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let response = client
            .get(NUTRITION_API_URL)
            .query(&[("query", ingredients_text)])
            .header("X-Api-Key", api_key)
            .send()
            .await?;

        if response.status().is_success() {
            let body = response.json::<NutritionLookupResponse>().await?;
            Ok(body.items)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            Err(NutritionApiError::ApiError { status, error_body })
        }
    }
}

#[async_trait]
impl NutritionLookup for NutritionClient {
    async fn fetch_totals(&self, ingredients_text: &str) -> NutritionData {
        match self.lookup(ingredients_text).await {
            Ok(items) => aggregate(&items),
            Err(e) => NutritionData {
                success: false,
                totals: NutrientTotals::default(),
                item_count: 0,
                message: Some(format!("Failed to fetch nutrition data: {}", e)),
            },
        }
    }
}
