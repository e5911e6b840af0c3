use colored::Colorize;

use super::role_label;
use crate::dialog::ChatEntry;

pub fn print_help() {
    println!("\n🥗 Nutritionist Commands:");
    println!("  Just answer the questions to continue the conversation");
    println!("  Examples:");
    println!("    - nutrition, then: 2 cups of rice");
    println!("    - meal plan, then answer the questions");
    println!("    - recipe, then: chicken, rice, broccoli");
    println!();

    println!("⚙️ System Commands:");
    println!("  help       - Show this help menu");
    println!("  restart    - Go back to the main menu");
    println!("  favorites  - List the recipes you saved");
    println!("  history    - Show the conversation so far");
    println!("  exit       - Exit the program");
    println!();
}

pub fn print_favorites(recipes: &[String]) {
    if recipes.is_empty() {
        println!("\n⭐ No favorite recipes yet. Answer 'yes' after a recipe suggestion to save it.\n");
        return;
    }

    println!("\n⭐ Favorite recipes:");
    for (i, recipe) in recipes.iter().enumerate() {
        let title = recipe.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
        println!("  {}. {}", (i + 1).to_string().cyan(), title);
    }
    println!();
}

pub fn print_history(entries: &[ChatEntry]) {
    println!();
    for entry in entries {
        println!(
            "{} {}",
            format!("[{}] {}:", entry.timestamp.format("%H:%M:%S"), role_label(entry.role)).dimmed(),
            entry.content
        );
    }
    println!();
}
