#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use nutrition_assistant::config::{DialogConfig, ProviderConfig};
use nutrition_assistant::dialog::DialogEngine;
use nutrition_assistant::food::analysis::nutrition::NutritionFacts;
use nutrition_assistant::food::api::NutritionSource;
use nutrition_assistant::food::NutritionRecord;
use nutrition_assistant::providers::{ChatMessage, ChatReply, CompletionProvider, FunctionCall, FunctionSpec};

/// One recorded `chat` call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub functions: Vec<FunctionSpec>,
}

/// Completion provider that replays canned replies in order.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<Result<ChatReply, String>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ScriptedProvider {
    pub fn push_text(&self, text: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(ChatReply::Text(text.to_string())));
        self
    }

    pub fn push_call(&self, name: &str, arguments: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(ChatReply::FunctionCall(FunctionCall {
            name: name.to_string(),
            arguments: arguments.to_string(),
        })));
        self
    }

    pub fn push_error(&self, message: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn new(_config: ProviderConfig, _api_key: String, _system_message: String) -> Result<Self> {
        Ok(Self::default())
    }

    async fn chat(&self, messages: &[ChatMessage], functions: &[FunctionSpec]) -> Result<ChatReply> {
        self.requests.lock().unwrap().push(RecordedRequest {
            messages: messages.to_vec(),
            functions: functions.to_vec(),
        });
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("script exhausted")),
        }
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok("scripted".to_string())
    }

    fn get_system_message(&self) -> String {
        "You are a helpful assistant.".to_string()
    }

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync> {
        Box::new(self.clone())
    }
}

/// Nutrition source backed by a fixed table; unknown foods are error records.
#[derive(Default)]
pub struct FakeNutrition {
    foods: HashMap<String, f64>,
    lookups: Mutex<Vec<String>>,
}

impl FakeNutrition {
    pub fn with(mut self, food: &str, calories: f64) -> Self {
        self.foods.insert(food.to_lowercase(), calories);
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl NutritionSource for FakeNutrition {
    async fn lookup(&self, food_item: &str) -> NutritionRecord {
        self.lookups.lock().unwrap().push(food_item.to_string());
        match self.foods.get(&food_item.to_lowercase()) {
            Some(&calories) => NutritionRecord::Facts(NutritionFacts {
                name: food_item.to_string(),
                calories,
                protein: calories / 10.0,
                fat: calories / 20.0,
                carbs: calories / 5.0,
            }),
            None => NutritionRecord::error("Could not fetch nutritional information"),
        }
    }
}

pub fn engine(provider: &ScriptedProvider, nutrition: Arc<FakeNutrition>, config: DialogConfig) -> DialogEngine {
    DialogEngine::new(Box::new(provider.clone()), nutrition, config)
}
