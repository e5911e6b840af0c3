use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use log::info;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::env;
use std::ops::ControlFlow;
use std::sync::Arc;
use thiserror::Error;

use nutrition_assistant::commands::CommandHandler;
use nutrition_assistant::config::{DialogConfig, ProviderConfig};
use nutrition_assistant::dialog::{DialogEngine, ValidationMode};
use nutrition_assistant::food::{FoodConfig, UsdaClient};
use nutrition_assistant::llm::assistant::DEFAULT_SYSTEM_PROMPT;
use nutrition_assistant::providers::{CompletionProvider, OpenAIProvider};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "AI nutritionist: nutrition facts, meal plans and recipe ideas", long_about = None)]
struct Args {
    /// Chat completion provider (openai, openrouter, deepseek, mistral)
    #[arg(long, default_value = "openai")]
    provider: String,

    /// API key for the chat provider, defaults to <PROVIDER>_API_KEY
    #[arg(short, long)]
    api_key: Option<String>,

    /// USDA FoodData Central API key, defaults to USDA_API_KEY
    #[arg(long)]
    usda_api_key: Option<String>,

    /// Override the chat model
    #[arg(long)]
    model: Option<String>,

    /// Validate answers against the known goals, diets and meal counts
    #[arg(long)]
    strict: bool,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Provider error: {0}")]
    ProviderError(String),
    #[error("Terminal error: {0}")]
    TerminalError(#[from] ReadlineError),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load environment variables
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse command line arguments
    let args = Args::parse();
    run_cli_mode(args).await
}

async fn run_cli_mode(args: Args) -> Result<(), AppError> {
    let provider_config = ProviderConfig::from_env(&args.provider).with_model(args.model.clone());

    // Get API key from command line or environment
    let api_key = match &args.api_key {
        Some(key) => key.clone(),
        None => env::var(provider_config.api_key_var()).unwrap_or_default(),
    };
    let provider = OpenAIProvider::new(provider_config.clone(), api_key, DEFAULT_SYSTEM_PROMPT.to_string())
        .await
        .map_err(|e| AppError::ProviderError(e.to_string()))?;
    info!(
        "Using {} with model {}",
        provider_config.provider,
        provider.get_model_info().await.unwrap_or_default()
    );

    let mut rl = Editor::<(), DefaultHistory>::new()?;

    let mut food_config = FoodConfig::from_env();
    if let Some(key) = args.usda_api_key {
        food_config.usda_api_key = key;
    }
    if !food_config.has_api_key() {
        println!("{}", "No USDA API key found (USDA_API_KEY).".yellow());
        food_config.usda_api_key = rl.readline("🔑 Enter your USDA API key: ")?.trim().to_string();
    }

    let mut dialog_config = DialogConfig::from_env();
    if args.strict {
        dialog_config.validation = ValidationMode::Strict;
    }

    let engine = DialogEngine::new(
        Box::new(provider),
        Arc::new(UsdaClient::new(food_config)),
        dialog_config,
    );
    let mut command_handler = CommandHandler::new(engine);

    println!("{}", "🍽️ AI-Powered Nutritionist Chatbot".bold());
    println!("Type 'help' for commands.");
    command_handler.greet().await;

    // Main input loop
    loop {
        match rl.readline("👤 ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                if let ControlFlow::Break(()) = command_handler.handle_command(input).await {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    info!(
        "Session {} ended after {} messages",
        command_handler.session().id,
        command_handler.session().messages.len()
    );
    Ok(())
}
