pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod timer;
pub mod units;
pub mod view;

pub use config::AppConfig;
pub use error::BrowseError;
pub use model::{Ingredient, Instruction, Recipe};
pub use store::{HttpSource, JsonFileSource, RecipeSource};
pub use timer::{CookingTimer, DisplayState, TimerDisplay};
pub use units::{convert, format, Measurement, Unit, UnitSystem};

use log::debug;

/// Load a recipe collection from a file path or an http(s) URL
pub async fn load_recipes(location: &str) -> Result<Vec<Recipe>, BrowseError> {
    debug!("loading recipes from {}", location);
    let source = store::source_for(location, None)?;
    source.load().await
}

/// Find a recipe by name, case-insensitively
pub fn find_recipe<'a>(recipes: &'a [Recipe], name: &str) -> Result<&'a Recipe, BrowseError> {
    let needle = name.to_lowercase();
    recipes
        .iter()
        .find(|recipe| recipe.name.to_lowercase() == needle)
        .ok_or_else(|| BrowseError::RecipeNotFound(name.to_string()))
}
