//! Runtime configuration, deserialised from `rota.toml` and `ROTA_*`
//! environment variables. Every field has a default so the server runs with
//! no config file at all.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:    String,
  #[serde(default = "default_port")]
  pub port:    u16,
  #[serde(default = "default_db_path")]
  pub db_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3001 }
fn default_db_path() -> PathBuf { PathBuf::from("rota.db") }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_config_falls_back_to_defaults() {
    let cfg: ServerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 3001);
    assert_eq!(cfg.db_path, PathBuf::from("rota.db"));
  }

  #[test]
  fn partial_config_overrides_selectively() {
    let cfg: ServerConfig = serde_json::from_str(r#"{"port": 8080}"#).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.host, "127.0.0.1");
  }
}
