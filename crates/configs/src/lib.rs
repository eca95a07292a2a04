use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// Where key/value records and the menu document live on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_menu_file")]
    pub menu_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), menu_file: default_menu_file() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            images_dir: default_images_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 3000 }
fn default_data_dir() -> String { "storage".into() }
fn default_menu_file() -> String { "menu.json".into() }
fn default_public_dir() -> String { "public".into() }
fn default_images_dir() -> String { "public/images".into() }
fn default_max_upload_bytes() -> usize { 20 * 1024 * 1024 }
fn default_log_format() -> String { "compact".into() }

/// `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from [`config_path`]; a missing file yields the defaults.
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_from(&config_path())
    }

    /// A file that exists and fails to parse or validate is still an error.
    pub fn load_or_default_from(path: &str) -> Result<Self> {
        let mut cfg = if std::path::Path::new(path).exists() {
            load_from_file(path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        self.assets.validate()?;
        self.logging.normalize();
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        if self.menu_file.trim().is_empty() {
            return Err(anyhow!("storage.menu_file must not be empty"));
        }
        Ok(())
    }
}

impl AssetsConfig {
    fn validate(&self) -> Result<()> {
        if self.public_dir.trim().is_empty() || self.images_dir.trim().is_empty() {
            return Err(anyhow!("assets.public_dir and assets.images_dir must not be empty"));
        }
        if self.max_upload_bytes == 0 {
            return Err(anyhow!("assets.max_upload_bytes must be > 0"));
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        let f = self.format.trim().to_ascii_lowercase();
        self.format = if f == "json" { f } else { default_log_format() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.storage.data_dir, "storage");
        assert_eq!(cfg.assets.images_dir, "public/images");
        assert_eq!(cfg.logging.format, "compact");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let mut cfg = parse(
            r#"
            [server]
            port = 8088
            worker_threads = 0

            [storage]
            data_dir = "/var/lib/menu"

            [logging]
            format = "JSON"
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.data_dir, "/var/lib/menu");
        assert_eq!(cfg.storage.menu_file, "menu.json");
        assert_eq!(cfg.logging.format, "json");
    }

    #[test]
    fn rejects_zero_port_and_zero_upload_limit() {
        let mut cfg = parse("[server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = parse("[assets]\nmax_upload_bytes = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_but_bad_file_fails() {
        let dir = std::env::temp_dir().join(format!("configs_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = dir.join("absent.toml");
        let cfg = AppConfig::load_or_default_from(missing.to_str().unwrap()).unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");

        let custom = dir.join("custom.toml");
        std::fs::write(&custom, "[server]\nport = 8081\n").unwrap();
        let cfg = AppConfig::load_or_default_from(custom.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 8081);

        let bad = dir.join("bad.toml");
        std::fs::write(&bad, "[server]\nport = 0\n").unwrap();
        assert!(AppConfig::load_or_default_from(bad.to_str().unwrap()).is_err());

        std::fs::write(&bad, "not = [toml").unwrap();
        assert!(AppConfig::load_or_default_from(bad.to_str().unwrap()).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
