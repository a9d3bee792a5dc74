use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}
fn default_busy_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:7411".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.db.path.as_os_str().is_empty() {
        anyhow::bail!("db.path must not be empty");
    }

    if config.db.max_connections == 0 {
        anyhow::bail!("db.max_connections must be >= 1");
    }

    if config.server.bind.is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parses_minimal_config_with_defaults() {
        let f = write_config("[db]\npath = \"/tmp/crm.db\"\n\n[server]\n");
        let cfg = load_config(f.path()).unwrap();
        assert_eq!(cfg.db.max_connections, 5);
        assert_eq!(cfg.db.busy_timeout_secs, 5);
        assert_eq!(cfg.server.bind, "127.0.0.1:7411");
    }

    #[test]
    fn rejects_zero_max_connections() {
        let f = write_config("[db]\npath = \"/tmp/crm.db\"\nmax_connections = 0\n\n[server]\n");
        assert!(load_config(f.path()).is_err());
    }

    #[test]
    fn rejects_empty_bind() {
        let f = write_config("[db]\npath = \"/tmp/crm.db\"\n\n[server]\nbind = \"\"\n");
        assert!(load_config(f.path()).is_err());
    }
}
