use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;

use super::{parse_collection, RecipeSource};
use crate::error::BrowseError;
use crate::model::Recipe;

/// Recipe collection stored in a local JSON file
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecipeSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<Recipe>, BrowseError> {
        debug!("reading recipes from {}", self.path.display());
        let body = tokio::fs::read_to_string(&self.path).await?;
        parse_collection(&body)
    }
}
