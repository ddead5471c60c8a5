use crate::core::{AppError, Result};
use crate::modules::tickets::models::{LedgerRules, TaxCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// Regulatory constants for the fare ledger.
///
/// Kept in configuration because the withholding rate and exemption list
/// follow tax circulars, not code releases.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    pub advance_tax_rate: Decimal,
    pub advance_tax_exempt: Vec<TaxCode>,
}

impl LedgerConfig {
    fn from_env() -> Result<Self> {
        let defaults = LedgerRules::default();

        let advance_tax_rate = match env::var("ADVANCE_TAX_RATE") {
            Ok(raw) => Decimal::from_str(&raw)
                .map_err(|_| AppError::Configuration("Invalid ADVANCE_TAX_RATE".to_string()))?,
            Err(_) => defaults.advance_tax_rate,
        };

        let advance_tax_exempt = match env::var("ADVANCE_TAX_EXEMPT") {
            Ok(raw) => raw
                .split(',')
                .filter(|code| !code.trim().is_empty())
                .map(|code| {
                    code.parse::<TaxCode>().map_err(|e| {
                        AppError::Configuration(format!("Invalid ADVANCE_TAX_EXEMPT: {}", e))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Err(_) => defaults.advance_tax_exempt,
        };

        Ok(LedgerConfig {
            advance_tax_rate,
            advance_tax_exempt,
        })
    }

    pub fn rules(&self) -> LedgerRules {
        LedgerRules {
            advance_tax_rate: self.advance_tax_rate,
            advance_tax_exempt: self.advance_tax_exempt.clone(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Ok(Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            ledger: LedgerConfig::from_env()?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err(AppError::Configuration(
                "Database max connections must be greater than 0".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::Configuration(
                "Database min connections cannot exceed max connections".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "Server workers must be greater than 0".to_string(),
            ));
        }

        if self.ledger.advance_tax_rate < Decimal::ZERO || self.ledger.advance_tax_rate > Decimal::ONE
        {
            return Err(AppError::Configuration(
                "Advance tax rate must be between 0 and 1".to_string(),
            ));
        }

        Ok(())
    }
}
