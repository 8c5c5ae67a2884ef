use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::{parse_collection, RecipeSource};
use crate::error::BrowseError;
use crate::model::Recipe;

/// Recipe collection served over HTTP as a static JSON document
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BrowseError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RecipeSource for HttpSource {
    async fn load(&self) -> Result<Vec<Recipe>, BrowseError> {
        debug!("fetching recipes from {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_collection(&body)
    }
}
