use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::ops::ControlFlow;
use std::time::Duration;

use crate::dialog::{DialogEngine, DialogState, Session};
use crate::providers::chat::Role;

mod system;

/// Shell-level commands; anything else is a dialog turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Restart,
    Favorites,
    History,
    Exit,
    Dialog(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "help" => Command::Help,
            "restart" | "menu" => Command::Restart,
            "favorites" | "favourites" => Command::Favorites,
            "history" => Command::History,
            "exit" | "quit" => Command::Exit,
            _ => Command::Dialog(input.trim().to_string()),
        }
    }
}

pub struct CommandHandler {
    engine: DialogEngine,
    session: Session,
}

impl CommandHandler {
    pub fn new(engine: DialogEngine) -> Self {
        Self {
            engine,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Shows the main menu by running the `start` turn.
    pub async fn greet(&mut self) {
        self.run_turn("").await;
    }

    pub async fn handle_command(&mut self, input: &str) -> ControlFlow<()> {
        match Command::parse(input) {
            Command::Help => system::print_help(),
            Command::Restart => {
                self.session.restart();
                self.greet().await;
            }
            Command::Favorites => system::print_favorites(self.session.liked_recipes.all()),
            Command::History => system::print_history(&self.session.messages),
            Command::Exit => {
                println!("👋 Goodbye!");
                return ControlFlow::Break(());
            }
            Command::Dialog(text) => self.run_turn(&text).await,
        }
        ControlFlow::Continue(())
    }

    async fn run_turn(&mut self, input: &str) {
        let spinner = spinner_for(self.session.state);
        let turn = self.engine.handle_turn(&mut self.session, input).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        let reply = if turn.accepted {
            turn.reply.truecolor(255, 236, 179)
        } else {
            turn.reply.yellow()
        };
        println!("\n{}\n", reply);
    }
}

// Only states that call out to external services get a spinner.
fn spinner_for(state: DialogState) -> Option<ProgressBar> {
    let message = match state {
        DialogState::ProvideNutritionInfo => "Fetching nutritional information...",
        DialogState::GetMealsPerDay => "Generating meal plan...",
        DialogState::SuggestRecipe => "Looking for recipes...",
        _ => return None,
    };

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

pub(crate) fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "👤 You",
        Role::Assistant => "🥗 Nutritionist",
        Role::System => "⚙️ System",
        Role::Function => "🔧 Function",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_commands() {
        assert_eq!(Command::parse("HELP"), Command::Help);
        assert_eq!(Command::parse(" restart "), Command::Restart);
        assert_eq!(Command::parse("quit"), Command::Exit);
        assert_eq!(Command::parse("favourites"), Command::Favorites);
        assert_eq!(
            Command::parse(" 2 cups of rice "),
            Command::Dialog("2 cups of rice".to_string())
        );
    }
}
