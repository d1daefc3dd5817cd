use crate::config::types::{Config, CrawlerConfig, InputConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > 64 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 64, got {}",
            config.workers
        )));
    }

    if config.run_duration_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "run_duration_secs must be >= 1, got {}",
            config.run_duration_secs
        )));
    }

    if config.fetch_concurrency < 1 || config.fetch_concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "fetch_concurrency must be between 1 and 100, got {}",
            config.fetch_concurrency
        )));
    }

    // A zero backoff degenerates into a tight poll loop against the
    // frontier and visited-set locks.
    if config.idle_backoff_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "idle_backoff_ms must be >= 1ms, got {}ms",
            config.idle_backoff_ms
        )));
    }

    if config.max_address_len < 16 {
        return Err(ConfigError::Validation(format!(
            "max_address_len must be >= 16 bytes, got {}",
            config.max_address_len
        )));
    }

    Ok(())
}

/// Validates input configuration
fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.seed_path.is_empty() {
        return Err(ConfigError::Validation(
            "seed_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.visited_path.is_empty() {
        return Err(ConfigError::Validation(
            "visited_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_valid_config() -> Config {
        Config {
            crawler: CrawlerConfig {
                workers: 4,
                run_duration_secs: 30,
                fetch_concurrency: 4,
                idle_backoff_ms: 100,
                max_address_len: 2048,
            },
            input: InputConfig {
                seed_path: "./seeds.txt".to_string(),
            },
            output: OutputConfig {
                visited_path: "./visited.txt".to_string(),
            },
            user_agent: UserAgentConfig {
                crawler_name: "TestCrawler".to_string(),
                crawler_version: "1.0".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let config = create_valid_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = create_valid_config();
        config.crawler.workers = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut config = create_valid_config();
        config.crawler.run_duration_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_fetch_concurrency_rejected() {
        let mut config = create_valid_config();
        config.crawler.fetch_concurrency = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_serial_fetch_concurrency_allowed() {
        // K=1 is a legitimate, fully serialized configuration
        let mut config = create_valid_config();
        config.crawler.fetch_concurrency = 1;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_backoff_rejected() {
        let mut config = create_valid_config();
        config.crawler.idle_backoff_ms = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_tiny_address_len_rejected() {
        let mut config = create_valid_config();
        config.crawler.max_address_len = 8;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_paths_rejected() {
        let mut config = create_valid_config();
        config.input.seed_path = String::new();
        assert!(validate(&config).is_err());

        let mut config = create_valid_config();
        config.output.visited_path = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_crawler_name_characters() {
        let mut config = create_valid_config();
        config.user_agent.crawler_name = "Test Crawler!".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = "test-crawler-2".to_string();
        assert!(validate(&config).is_ok());
    }
}
