pub mod usda;

use async_trait::async_trait;

use crate::food::analysis::nutrition::NutritionRecord;

// Re-export common types
pub use usda::{UsdaClient, UsdaError};

/// Anything that can turn a free-text food name into a nutrition record.
#[async_trait]
pub trait NutritionSource: Send + Sync {
    async fn lookup(&self, food_item: &str) -> NutritionRecord;
}
