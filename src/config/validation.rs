use super::Config;
use anyhow::Result;
use url::Url;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn error(path: &str, message: &str) -> ConfigValidationError {
    ConfigValidationError {
        path: path.to_string(),
        message: message.to_string(),
    }
}

/// Validate a configuration object.
pub fn validate_config(config: &Config) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    if config.gateway.url.is_empty() {
        errors.push(error("gateway.url", "Gateway URL is required"));
    } else {
        match Url::parse(&config.gateway.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(error(
                "gateway.url",
                &format!("Unsupported scheme '{}', expected http or https", url.scheme()),
            )),
            Err(e) => errors.push(error("gateway.url", &format!("Invalid URL: {e}"))),
        }
    }

    let session = config.gateway.session.trim();
    if session.is_empty() {
        errors.push(error("gateway.session", "Session name is required"));
    } else if session.contains('/') {
        errors.push(error("gateway.session", "Session name must not contain '/'"));
    }

    if config.http.timeout_secs == 0 {
        errors.push(error("http.timeoutSecs", "Timeout must be greater than 0"));
    }

    errors
}

/// Validate configuration and return Result.
pub fn validate_config_object(config: &Config) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!("Configuration validation failed:\n{}", messages.join("\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, session: &str) -> Config {
        let mut config = Config::default();
        config.gateway.url = url.to_string();
        config.gateway.session = session.to_string();
        config
    }

    fn paths(errors: &[ConfigValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&config("http://localhost:3000", "default")).is_empty());
        assert!(validate_config_object(&config("https://wa.example.com/api", "ops")).is_ok());
    }

    #[test]
    fn test_url_errors() {
        assert_eq!(paths(&validate_config(&config("", "default"))), vec!["gateway.url"]);
        assert_eq!(
            paths(&validate_config(&config("not a url", "default"))),
            vec!["gateway.url"]
        );
        let errors = validate_config(&config("ftp://gw", "default"));
        assert!(errors[0].message.contains("ftp"));
    }

    #[test]
    fn test_session_and_timeout_errors() {
        let mut cfg = config("http://gw", " ");
        cfg.http.timeout_secs = 0;
        let errors = validate_config(&cfg);
        assert_eq!(paths(&errors), vec!["gateway.session", "http.timeoutSecs"]);

        let errors = validate_config(&config("http://gw", "a/b"));
        assert_eq!(paths(&errors), vec!["gateway.session"]);

        let err = validate_config_object(&cfg).unwrap_err().to_string();
        assert!(err.contains("gateway.session: Session name is required"));
    }
}
