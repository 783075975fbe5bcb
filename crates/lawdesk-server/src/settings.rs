//! Server configuration, read from `config.toml` and `LAWDESK_*` variables.

use std::{path::PathBuf, time::Duration};

use chrono::FixedOffset;
use lawdesk_api::{ApiOptions, AuthConfig};
use lawdesk_core::mapper::MapperDefaults;
use lawdesk_render::RenderConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  /// SQLite database file; `~/` is expanded.
  pub store_path:         PathBuf,
  /// Directory that holds `uploads/petitions/`.
  pub artifacts_root:     PathBuf,
  /// Prefix for document URLs, e.g. `https://desk.example.org`.
  pub public_base_url:    Option<String>,
  pub render:             RenderSection,
  pub auth_username:      Option<String>,
  pub auth_password_hash: Option<String>,
  pub mapper:             MapperDefaults,
  /// Minutes east of UTC used to date petitions, e.g. `330` for IST.
  pub utc_offset_minutes: Option<i32>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:               "127.0.0.1".into(),
      port:               5000,
      store_path:         PathBuf::from("lawdesk.db"),
      artifacts_root:     PathBuf::from("."),
      public_base_url:    None,
      render:             RenderSection::default(),
      auth_username:      None,
      auth_password_hash: None,
      mapper:             MapperDefaults::default(),
      utc_offset_minutes: None,
    }
  }
}

/// `[render]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderSection {
  pub base_url:     String,
  pub timeout_secs: u64,
}

impl Default for RenderSection {
  fn default() -> Self {
    let defaults = RenderConfig::default();
    Self { base_url: defaults.base_url, timeout_secs: defaults.timeout.as_secs() }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn render_config(&self) -> RenderConfig {
    RenderConfig {
      base_url: self.render.base_url.clone(),
      timeout:  Duration::from_secs(self.render.timeout_secs),
    }
  }

  /// Basic auth is enabled when both the username and the hash are set, and
  /// left off when neither is. Setting only one of them is rejected.
  pub fn auth(&self) -> anyhow::Result<Option<AuthConfig>> {
    fn set(v: &Option<String>) -> Option<&str> { v.as_deref().filter(|s| !s.trim().is_empty()) }
    match (set(&self.auth_username), set(&self.auth_password_hash)) {
      (Some(username), Some(hash)) => Ok(Some(AuthConfig {
        username:      username.to_string(),
        password_hash: hash.to_string(),
      })),
      (None, None) => Ok(None),
      (Some(_), None) => {
        anyhow::bail!("auth_username is set but auth_password_hash is missing")
      }
      (None, Some(_)) => {
        anyhow::bail!("auth_password_hash is set but auth_username is missing")
      }
    }
  }

  pub fn utc_offset(&self) -> anyhow::Result<Option<FixedOffset>> {
    self
      .utc_offset_minutes
      .map(|minutes| {
        minutes
          .checked_mul(60)
          .and_then(FixedOffset::east_opt)
          .ok_or_else(|| anyhow::anyhow!("utc_offset_minutes out of range: {minutes}"))
      })
      .transpose()
  }

  pub fn api_options(&self) -> anyhow::Result<ApiOptions> {
    Ok(ApiOptions {
      auth:            self.auth()?,
      public_base_url: self.public_base_url.clone().filter(|u| !u.trim().is_empty()),
      mapper:          self.mapper.clone(),
      utc_offset:      self.utc_offset()?,
    })
  }
}

#[cfg(test)]
mod tests {
  use config::{Config, File, FileFormat};

  use super::*;

  fn parse(toml: &str) -> ServerConfig {
    Config::builder()
      .add_source(File::from_str(toml, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_file_uses_defaults() {
    let cfg = parse("");
    assert_eq!(cfg.address(), "127.0.0.1:5000");
    assert_eq!(cfg.render_config().timeout, Duration::from_secs(30));
    assert!(cfg.auth().unwrap().is_none());
    assert_eq!(cfg.mapper, MapperDefaults::default());
  }

  #[test]
  fn sections_override_defaults() {
    let cfg = parse(
      r#"
        port = 8000
        public_base_url = "https://desk.example.org"
        auth_username = "clerk"
        auth_password_hash = "$argon2id$v=19$stub"

        [render]
        base_url = "http://renderer:9000"
        timeout_secs = 5

        utc_offset_minutes = 330

        [mapper]
        place = "Madurai"
      "#,
    );
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.render_config().base_url, "http://renderer:9000");
    assert_eq!(cfg.render_config().timeout, Duration::from_secs(5));

    let options = cfg.api_options().unwrap();
    assert_eq!(options.auth.unwrap().username, "clerk");
    assert_eq!(options.public_base_url.as_deref(), Some("https://desk.example.org"));
    assert_eq!(options.mapper.place, "Madurai");
    assert_eq!(options.mapper.court_name, "COIMBATORE");
    assert_eq!(options.utc_offset.map(|o| o.local_minus_utc()), Some(330 * 60));
  }

  #[test]
  fn half_configured_auth_is_rejected() {
    let err = parse(r#"auth_username = "clerk""#).api_options().unwrap_err();
    assert!(err.to_string().contains("auth_password_hash"));

    let err = parse(r#"auth_password_hash = "$argon2id$v=19$stub""#)
      .auth()
      .unwrap_err();
    assert!(err.to_string().contains("auth_username"));
  }

  #[test]
  fn out_of_range_offset_is_rejected() {
    assert!(parse("utc_offset_minutes = 1440").utc_offset().is_err());
    assert!(parse("").utc_offset().unwrap().is_none());
  }

  #[test]
  fn blank_auth_fields_count_as_unset() {
    let cfg = parse(
      r#"
        auth_username = ""
        auth_password_hash = "  "
      "#,
    );
    assert!(cfg.auth().unwrap().is_none());
  }
}
