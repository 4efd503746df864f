use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub quiz: QuizConfig,
}

/// Sizing knobs for the quiz generator.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    /// Questions in the all-categories "Quiz of the Day".
    pub daily_size: usize,
    /// Questions in a single-category quiz.
    pub category_size: usize,
    /// Upper bound on the distractor word pool fetched per quiz.
    pub distractor_limit: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            daily_size: 15,
            category_size: 10,
            distractor_limit: 100,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let config_builder = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", env)).required(false), // Allow missing config file, fallback to ENV
            )
            // Override with environment variables (prefix: APP_)
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let settings = config_builder.build()?;

        let database_url = settings
            .get_string("database.url")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| {
                if env == "prod" {
                    panic!("FATAL: DATABASE_URL must be set in production!");
                }
                eprintln!("WARNING: Using default local database URL (dev mode only!)");
                "mysql://root@localhost:3306/senalearn".to_string()
            });

        let defaults = QuizConfig::default();
        let quiz = QuizConfig {
            daily_size: settings
                .get_int("quiz.daily_size")
                .map(|v| v as usize)
                .unwrap_or(defaults.daily_size),
            category_size: settings
                .get_int("quiz.category_size")
                .map(|v| v as usize)
                .unwrap_or(defaults.category_size),
            distractor_limit: settings
                .get_int("quiz.distractor_limit")
                .map(|v| v as usize)
                .unwrap_or(defaults.distractor_limit),
        };

        Ok(Config { database_url, quiz })
    }
}
