//! Configuration and bang source loading.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::bang::{Registry, RegistryError};
use crate::config::schema::{BangFile, RegistryConfig, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
    Fetch(reqwest::Error),
    Registry(RegistryError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
            ConfigError::Fetch(e) => write!(f, "Fetch error: {}", e),
            ConfigError::Registry(e) => write!(f, "Invalid bangs: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Fetch(e) => Some(e),
            ConfigError::Registry(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

impl From<RegistryError> for ConfigError {
    fn from(e: RegistryError) -> Self {
        ConfigError::Registry(e)
    }
}

/// Load and validate service configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ServiceConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a bang definition file from its TOML text.
pub fn parse_bang_file(content: &str) -> Result<BangFile, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Read a bang definition file from disk.
pub fn load_bang_file(path: &Path) -> Result<BangFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_bang_file(&content)
}

/// Download a bang definition file.
pub async fn fetch_bang_file(url: &str, timeout: Duration) -> Result<BangFile, ConfigError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(ConfigError::Fetch)?;

    let content = client
        .get(url)
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(ConfigError::Fetch)?
        .text()
        .await
        .map_err(ConfigError::Fetch)?;

    parse_bang_file(&content)
}

/// Build a registry from a parsed definition file.
pub fn build_registry(file: BangFile, strict: bool) -> Result<Registry, RegistryError> {
    if strict {
        Registry::build_strict(&file.default, file.bangs)
    } else {
        Registry::build(&file.default, file.bangs)
    }
}

/// Load the configured bang source and build the registry.
pub async fn load_registry(
    config: &RegistryConfig,
    fetch_timeout: Duration,
) -> Result<Registry, ConfigError> {
    let file = if config.is_remote() {
        tracing::info!(url = %config.source, "Fetching bang definitions");
        fetch_bang_file(&config.source, fetch_timeout).await?
    } else {
        tracing::info!(path = %config.source, "Reading bang definitions");
        load_bang_file(Path::new(&config.source))?
    };

    let registry = build_registry(file, config.strict)?;

    tracing::info!(
        bangs = registry.len(),
        shadowed = registry.shadowed().len(),
        default = %registry.default_template(),
        "Bang registry built"
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BANGS: &str = r#"
default = "https://duckduckgo.com/?q={}"

[[bangs]]
bang = "g"
url = "https://www.google.com/search?q={}"

[[bangs]]
bang = "g"
url = "https://www.bing.com/search?q={}"
"#;

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[listener]\nbind_address = \"127.0.0.1:3000\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeouts]\nrequest_secs = 0").unwrap();

        assert!(matches!(load_config(file.path()), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/bangs-service.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_build_registry_policies() {
        let file = parse_bang_file(BANGS).unwrap();

        let lenient = build_registry(file.clone(), false).unwrap();
        assert_eq!(lenient.len(), 1);
        assert_eq!(lenient.shadowed().len(), 1);

        assert!(matches!(
            build_registry(file, true),
            Err(RegistryError::Duplicate { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_registry_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BANGS.as_bytes()).unwrap();

        let config = RegistryConfig {
            source: file.path().display().to_string(),
            ..RegistryConfig::default()
        };
        let registry = load_registry(&config, Duration::from_secs(1)).await.unwrap();
        assert!(registry.lookup("g").is_some());
    }

    /// Serve `BANGS` over HTTP on an ephemeral port.
    async fn serve_bangs() -> std::net::SocketAddr {
        use axum::{routing::get, Router};

        let app = Router::new()
            .route("/bangs.toml", get(|| async { BANGS }))
            .route(
                "/slow.toml",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    BANGS
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        addr
    }

    fn remote(addr: std::net::SocketAddr, file: &str) -> RegistryConfig {
        RegistryConfig {
            source: format!("http://{}/{}", addr, file),
            ..RegistryConfig::default()
        }
    }

    #[tokio::test]
    async fn test_load_registry_from_url() {
        let addr = serve_bangs().await;
        let config = remote(addr, "bangs.toml");
        assert!(config.is_remote());

        let registry = load_registry(&config, Duration::from_secs(5)).await.unwrap();
        assert_eq!(
            registry.lookup("g").unwrap().template().as_str(),
            "https://www.google.com/search?q={}"
        );
        assert_eq!(registry.shadowed().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_remote_source_is_fetch_error() {
        let addr = serve_bangs().await;
        let err = load_registry(&remote(addr, "missing.toml"), Duration::from_secs(5))
            .await
            .unwrap_err();
        match err {
            ConfigError::Fetch(e) => {
                assert_eq!(e.status(), Some(reqwest::StatusCode::NOT_FOUND));
            }
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_remote_source_times_out() {
        let addr = serve_bangs().await;
        let err = fetch_bang_file(
            &format!("http://{}/slow.toml", addr),
            Duration::from_millis(200),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ConfigError::Fetch(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_remote_strict_mode_rejects_duplicates() {
        let addr = serve_bangs().await;
        let config = RegistryConfig {
            strict: true,
            ..remote(addr, "bangs.toml")
        };
        let err = load_registry(&config, Duration::from_secs(5)).await.unwrap_err();
        assert!(matches!(err, ConfigError::Registry(RegistryError::Duplicate { .. })));
    }

    #[test]
    fn test_bundled_bang_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("bangs.toml");
        let registry = build_registry(load_bang_file(&path).unwrap(), true).unwrap();
        assert!(registry.lookup("g").is_some());
        assert!(registry.shadowed().is_empty());
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(
            parse_bang_file("bangs = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
