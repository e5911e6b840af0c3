pub mod commands;
pub mod config;
pub mod dialog;
pub mod food;
pub mod llm;
pub mod providers;

// Re-export commonly used items
pub use dialog::{DialogEngine, DialogState, Session, Turn};
pub use food::{NutritionRecord, NutritionSource, UsdaClient};
pub use providers::{CompletionProvider, OpenAIProvider};
