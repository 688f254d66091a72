use serde::{Deserialize, Serialize};

/// `modules.catalog` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default = "default_movies_collection")]
    pub movies_collection: String,
    #[serde(default = "default_genres_collection")]
    pub genres_collection: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            movies_collection: default_movies_collection(),
            genres_collection: default_genres_collection(),
        }
    }
}

fn default_movies_collection() -> String {
    "movies".to_string()
}

fn default_genres_collection() -> String {
    "genres".to_string()
}
