const DEFAULT_USDA_API_URL: &str = "https://api.nal.usda.gov/fdc/v1";

#[derive(Debug, Clone)]
pub struct FoodConfig {
    pub usda_api_key: String,
    pub usda_api_url: String,
}

impl FoodConfig {
    pub fn new(usda_api_key: impl Into<String>) -> Self {
        Self {
            usda_api_key: usda_api_key.into(),
            usda_api_url: DEFAULT_USDA_API_URL.to_string(),
        }
    }

    /// Reads `USDA_API_KEY` and `USDA_API_URL`. A missing key is left empty so
    /// the shell can ask for it instead of refusing to start.
    pub fn from_env() -> Self {
        Self {
            usda_api_key: std::env::var("USDA_API_KEY").unwrap_or_default(),
            usda_api_url: std::env::var("USDA_API_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USDA_API_URL.to_string()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.usda_api_key.trim().is_empty()
    }
}
