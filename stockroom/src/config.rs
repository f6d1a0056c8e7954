//! Application configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::catalog::MAX_PRODUCTS;
use crate::error::{AppError, AppResult};
use std::env;
use std::path::PathBuf;
use stockroom_store::DEFAULT_STORAGE_KEY;

// =============================================================================
// Configuration
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage configuration
    pub storage: StorageConfig,

    /// Catalog configuration
    pub catalog: CatalogConfig,

    /// Environment (test, development, production)
    pub environment: Environment,
}

/// Where the product collection is kept.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory for the file gateway
    pub data_dir: PathBuf,
    /// Key the collection blob is stored under
    pub storage_key: String,
}

/// Catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Maximum number of products
    pub max_products: usize,
}

/// Environment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Test environment (in-memory storage)
    Test,
    /// Development environment
    Development,
    /// Production environment
    Production,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let environment = Self::load_environment()?;
        let storage = Self::load_storage_config()?;
        let catalog = Self::load_catalog_config()?;

        Ok(Self {
            storage,
            catalog,
            environment,
        })
    }

    /// Create test configuration.
    pub fn test() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: env::temp_dir().join("stockroom-test"),
                storage_key: DEFAULT_STORAGE_KEY.to_string(),
            },
            catalog: CatalogConfig {
                max_products: MAX_PRODUCTS,
            },
            environment: Environment::Test,
        }
    }

    fn load_environment() -> AppResult<Environment> {
        let env_str = env::var("STOCKROOM_ENV").unwrap_or_else(|_| "development".to_string());
        Self::parse_environment(&env_str)
    }

    fn parse_environment(value: &str) -> AppResult<Environment> {
        match value.to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(AppError::Config(format!(
                "Invalid STOCKROOM_ENV: {}. Expected: test, development, production",
                other
            ))),
        }
    }

    fn load_storage_config() -> AppResult<StorageConfig> {
        let data_dir = env::var("STOCKROOM_DATA_DIR").unwrap_or_else(|_| "./.stockroom".to_string());
        let storage_key =
            env::var("STOCKROOM_STORAGE_KEY").unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());

        if data_dir.trim().is_empty() {
            return Err(AppError::Config("STOCKROOM_DATA_DIR must not be empty".to_string()));
        }
        if storage_key.is_empty() {
            return Err(AppError::Config("STOCKROOM_STORAGE_KEY must not be empty".to_string()));
        }

        Ok(StorageConfig {
            data_dir: PathBuf::from(data_dir),
            storage_key,
        })
    }

    fn load_catalog_config() -> AppResult<CatalogConfig> {
        let max_products = match env::var("STOCKROOM_MAX_PRODUCTS") {
            Ok(val) => Self::parse_max_products(&val)?,
            Err(_) => MAX_PRODUCTS,
        };

        Ok(CatalogConfig { max_products })
    }

    fn parse_max_products(value: &str) -> AppResult<usize> {
        match value.trim().parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(AppError::Config(format!("Invalid STOCKROOM_MAX_PRODUCTS value: {}", value))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: PathBuf::from("./.stockroom"),
                storage_key: DEFAULT_STORAGE_KEY.to_string(),
            },
            catalog: CatalogConfig {
                max_products: MAX_PRODUCTS,
            },
            environment: Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
