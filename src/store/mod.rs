//! Loading recipe collections from a file or over HTTP.
//!
//! Sources own the validation contract: by the time a recipe reaches the
//! converter or the timer, its text is decoded and its amounts are finite
//! and non-negative.

mod file;
mod http;

pub use file::JsonFileSource;
pub use http::HttpSource;

use std::time::Duration;

use async_trait::async_trait;
use html_escape::decode_html_entities;
use log::debug;

use crate::error::BrowseError;
use crate::model::Recipe;

/// A place recipe collections come from
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Load, sanitize and validate the full recipe collection
    async fn load(&self) -> Result<Vec<Recipe>, BrowseError>;
}

/// Pick a source implementation for a file path or an http(s) URL
pub fn source_for(
    location: &str,
    timeout: Option<Duration>,
) -> Result<Box<dyn RecipeSource>, BrowseError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(JsonFileSource::new(location)))
    }
}

/// Parse a JSON document into sanitized, validated recipes.
///
/// Shared by the file and HTTP sources.
pub(crate) fn parse_collection(body: &str) -> Result<Vec<Recipe>, BrowseError> {
    let mut recipes: Vec<Recipe> = serde_json::from_str(body)?;
    for recipe in &mut recipes {
        sanitize(recipe);
        validate(recipe)?;
    }
    debug!("loaded {} recipes", recipes.len());
    Ok(recipes)
}

/// Decode the HTML entities that web-sourced recipe data tends to carry
fn sanitize(recipe: &mut Recipe) {
    recipe.name = decode(&recipe.name);
    recipe.description = decode(&recipe.description);
    for ingredient in &mut recipe.ingredients {
        ingredient.name = decode(&ingredient.name);
    }
    for instruction in &mut recipe.instructions {
        instruction.text = decode(&instruction.text);
    }
}

fn decode(text: &str) -> String {
    decode_html_entities(text).into_owned()
}

/// The converter trusts its input; malformed amounts are rejected here
fn validate(recipe: &Recipe) -> Result<(), BrowseError> {
    for ingredient in &recipe.ingredients {
        if !ingredient.amount.is_finite() || ingredient.amount < 0.0 {
            return Err(BrowseError::InvalidData(format!(
                "ingredient '{}' in '{}' has amount {}",
                ingredient.name, recipe.name, ingredient.amount
            )));
        }
    }
    Ok(())
}
