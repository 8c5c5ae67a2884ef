use std::env;
use std::io::Write;
use std::sync::Arc;

use recipe_browser::{
    store, view, AppConfig, CookingTimer, DisplayState, Recipe, TimerDisplay, UnitSystem,
};

/// Terminal display sink: rewrites the countdown in place
struct ConsoleDisplay;

impl TimerDisplay for ConsoleDisplay {
    fn set_text(&self, text: &str) {
        print!("\r   {}", text);
        let _ = std::io::stdout().flush();
    }

    fn set_state(&self, state: DisplayState) {
        if state == DisplayState::Done {
            println!("  (done)");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load()?;
    let mut units = config.units;
    let mut cook = false;
    let mut positional: Vec<String> = Vec::new();

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--metric" => units = UnitSystem::Metric,
            "--imperial" => units = UnitSystem::Imperial,
            "--cook" => cook = true,
            _ => positional.push(arg),
        }
    }

    let location = positional
        .first()
        .cloned()
        .or_else(|| config.data_source.clone())
        .ok_or("Please provide a recipes file or URL (or set data_source in config)")?;

    let source = store::source_for(&location, Some(config.http_timeout()))?;
    let recipes = source.load().await?;

    if positional.len() < 2 {
        for recipe in &recipes {
            println!("{}", view::recipe_summary(recipe));
        }
        return Ok(());
    }

    let name = positional[1..].join(" ");
    let recipe = recipe_browser::find_recipe(&recipes, &name)?;
    print_recipe(recipe, units);

    if cook {
        cook_through(recipe, &config.cooking_timer()).await;
    }

    Ok(())
}

fn print_recipe(recipe: &Recipe, units: UnitSystem) {
    println!("{}", recipe.name);
    if !recipe.description.is_empty() {
        println!("{}", recipe.description);
    }
    println!();

    for ingredient in &recipe.ingredients {
        println!("  {}", view::ingredient_line_dual(ingredient, units));
    }
    println!();

    for (index, instruction) in recipe.instructions.iter().enumerate() {
        println!("{}", view::instruction_line(index, instruction));
    }
}

/// Walk the instructions, running a countdown for every timed step
async fn cook_through(recipe: &Recipe, timer: &CookingTimer) {
    for (index, instruction) in recipe.instructions.iter().enumerate() {
        println!("\n{}", view::instruction_line(index, instruction));
        if let Some(seconds) = instruction.duration_secs() {
            let (done_tx, done_rx) = tokio::sync::oneshot::channel();
            timer.start(
                seconds,
                Arc::new(ConsoleDisplay),
                Some(Box::new(move || {
                    let _ = done_tx.send(());
                })),
            );
            let _ = done_rx.await;
        }
    }
}
