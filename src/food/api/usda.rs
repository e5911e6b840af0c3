use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use super::NutritionSource;
use crate::food::analysis::nutrition::{NutritionFacts, NutritionRecord};
use crate::food::config::FoodConfig;

const ENERGY: &str = "Energy";
const PROTEIN: &str = "Protein";
const FAT: &str = "Total lipid (fat)";
const CARBS: &str = "Carbohydrate, by difference";

#[derive(Error, Debug)]
pub enum UsdaError {
    #[error("USDA API key is not configured")]
    MissingApiKey,
    /// The request URL carries the API key, so it is stripped before the
    /// error is stored or displayed.
    #[error("Failed to send request: {0}")]
    Request(reqwest::Error),
    #[error("API request failed with status: {0}")]
    Status(StatusCode),
    #[error("No nutrition data found for '{0}'")]
    NoMatch(String),
}

impl From<reqwest::Error> for UsdaError {
    fn from(e: reqwest::Error) -> Self {
        UsdaError::Request(e.without_url())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<Food>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Food {
    description: String,
    #[serde(default)]
    food_nutrients: Vec<FoodNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodNutrient {
    nutrient_name: String,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    unit_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UsdaClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl UsdaClient {
    pub fn new(config: FoodConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.usda_api_key,
            base_url: config.usda_api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Single-result search; the first food returned is taken as the match.
    pub async fn search_food(&self, query: &str) -> Result<NutritionFacts, UsdaError> {
        if self.api_key.trim().is_empty() {
            return Err(UsdaError::MissingApiKey);
        }

        let url = format!("{}/foods/search", self.base_url);
        debug!("USDA search for '{}'", query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", query),
                ("pageSize", "1"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UsdaError::Status(status));
        }

        let data: SearchResponse = response.json().await?;
        let food = data
            .foods
            .into_iter()
            .next()
            .ok_or_else(|| UsdaError::NoMatch(query.to_string()))?;

        Ok(map_nutrients(food))
    }
}

#[async_trait]
impl NutritionSource for UsdaClient {
    async fn lookup(&self, food_item: &str) -> NutritionRecord {
        match self.search_food(food_item).await {
            Ok(facts) => NutritionRecord::Facts(facts),
            Err(e) => {
                warn!("Nutrition lookup for '{}' failed: {}", food_item, e);
                NutritionRecord::error(format!("Could not fetch nutritional information: {}", e))
            }
        }
    }
}

/// Resolves the four tracked nutrients by name; absent nutrients count as 0.
fn map_nutrients(food: Food) -> NutritionFacts {
    let nutrients = &food.food_nutrients;
    NutritionFacts {
        calories: energy_kcal(nutrients),
        protein: nutrient_value(nutrients, PROTEIN),
        fat: nutrient_value(nutrients, FAT),
        carbs: nutrient_value(nutrients, CARBS),
        name: food.description,
    }
}

fn nutrient_value(nutrients: &[FoodNutrient], name: &str) -> f64 {
    nutrients
        .iter()
        .find(|n| n.nutrient_name == name)
        .and_then(|n| n.value)
        .unwrap_or(0.0)
}

// "Energy" can be listed once in kcal and once in kJ.
fn energy_kcal(nutrients: &[FoodNutrient]) -> f64 {
    let mut energy = nutrients.iter().filter(|n| n.nutrient_name == ENERGY);
    let kcal = energy.clone().find(|n| {
        n.unit_name
            .as_deref()
            .map_or(false, |unit| unit.eq_ignore_ascii_case("KCAL"))
    });

    kcal.or_else(|| energy.next())
        .and_then(|n| n.value)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nutrient(name: &str, value: f64, unit: &str) -> FoodNutrient {
        FoodNutrient {
            nutrient_name: name.to_string(),
            value: Some(value),
            unit_name: Some(unit.to_string()),
        }
    }

    #[test]
    fn test_maps_nutrients_by_name_not_position() {
        let food = Food {
            description: "Rice, white, cooked".to_string(),
            food_nutrients: vec![
                nutrient(CARBS, 28.2, "G"),
                nutrient("Fiber, total dietary", 0.4, "G"),
                nutrient(FAT, 0.3, "G"),
                nutrient(ENERGY, 544.0, "kJ"),
                nutrient(PROTEIN, 2.7, "G"),
                nutrient(ENERGY, 130.0, "KCAL"),
            ],
        };

        let facts = map_nutrients(food);
        assert_eq!(facts.name, "Rice, white, cooked");
        assert_eq!(facts.calories, 130.0);
        assert_eq!(facts.protein, 2.7);
        assert_eq!(facts.fat, 0.3);
        assert_eq!(facts.carbs, 28.2);
    }

    #[test]
    fn test_missing_nutrients_default_to_zero() {
        let food = Food {
            description: "Water".to_string(),
            food_nutrients: vec![nutrient(ENERGY, 0.5, "kJ")],
        };

        let facts = map_nutrients(food);
        assert_eq!(facts.calories, 0.5);
        assert_eq!(facts.protein, 0.0);
        assert_eq!(facts.fat, 0.0);
        assert_eq!(facts.carbs, 0.0);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_error_record() {
        let client = UsdaClient::new(FoodConfig::new(""));
        let record = client.lookup("rice").await;
        assert!(record.is_error());
    }

    #[tokio::test]
    async fn test_transport_failure_does_not_expose_api_key() {
        let client = UsdaClient::new(FoodConfig {
            usda_api_key: "SECRET-USDA-KEY".to_string(),
            usda_api_url: "http://127.0.0.1:1".to_string(),
        });

        let record = client.lookup("rice").await;

        let error = match record {
            NutritionRecord::Error { error } => error,
            NutritionRecord::Facts(facts) => panic!("unexpected facts: {:?}", facts),
        };
        assert!(error.starts_with("Could not fetch nutritional information"));
        assert!(!error.contains("SECRET-USDA-KEY"));
    }
}
