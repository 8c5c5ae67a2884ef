use thiserror::Error;

/// Errors that can occur while loading or browsing recipes
#[derive(Error, Debug)]
pub enum BrowseError {
    /// Failed to read a recipe file
    #[error("Failed to read recipe file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to fetch recipes over HTTP
    #[error("Failed to fetch recipes: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Recipe data did not parse as JSON
    #[error("Failed to parse recipe data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Recipe data parsed but failed validation
    #[error("Invalid recipe data: {0}")]
    InvalidData(String),

    /// No recipe with the requested name in the collection
    #[error("No recipe named '{0}'")]
    RecipeNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
