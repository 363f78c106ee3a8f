//! Load configuration via `config` crate with env-override support.
//!
//! Keys mirror the action inputs, lowercased: `eventtype`, `repotoken`,
//! `labelname`, `secondsutillabel`, `goodfirstissue` and `apiurl`. Inside a
//! workflow they arrive as `INPUT_*` environment variables.

use std::{ops::Deref, sync::Arc, time::Duration};

use serde::Deserialize;
use tracing::warn;

use super::types::Res;

/// Default GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default label applied to unlabeled issues.
fn default_label_name() -> String {
    "triage".to_string()
}

/// Default delay before labeling, in seconds.
fn default_seconds_until_label() -> String {
    "0".to_string()
}

/// The good-first-issue check is off unless asked for.
fn default_good_first_issue() -> String {
    "false".to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Configuration for the issue-labeler.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// The triggering event, `opened` or `labeled` (`INPUT_EVENTTYPE`).
    #[serde(rename = "eventtype", default)]
    pub event_type: String,
    /// Token used against the issue tracker (`INPUT_REPOTOKEN`).
    #[serde(rename = "repotoken")]
    pub repo_token: String,
    /// Label applied to unlabeled issues, and removed once another label lands (`INPUT_LABELNAME`).
    #[serde(rename = "labelname", default = "default_label_name")]
    pub label_name: String,
    /// Seconds to wait before labeling a new issue (`INPUT_SECONDSUTILLABEL`).
    #[serde(rename = "secondsutillabel", default = "default_seconds_until_label")]
    pub seconds_until_label: String,
    /// Enables the good-first-issue check when exactly `true` (`INPUT_GOODFIRSTISSUE`).
    #[serde(rename = "goodfirstissue", default = "default_good_first_issue")]
    pub good_first_issue: String,
    /// Base URL of the GitHub REST API (`INPUT_APIURL`, falling back to `GITHUB_API_URL`).
    #[serde(rename = "apiurl", default = "default_api_url")]
    pub api_url: String,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            event_type: String::new(),
            repo_token: String::new(),
            label_name: default_label_name(),
            seconds_until_label: default_seconds_until_label(),
            good_first_issue: default_good_first_issue(),
            api_url: default_api_url(),
        }
    }
}

impl ConfigInner {
    /// Whether the good-first-issue check should run.
    pub fn good_first_issue_enabled(&self) -> bool {
        self.good_first_issue == "true"
    }

    /// The wait before labeling a new issue.
    ///
    /// Input that carries no leading integer, or a negative one, waits for nothing.
    pub fn label_delay(&self) -> Duration {
        match parse_leading_int(&self.seconds_until_label) {
            Some(seconds) if seconds > 0 => Duration::from_secs(seconds as u64),
            Some(_) => Duration::ZERO,
            None => {
                warn!("Ignoring non-numeric delay `{}`; labeling immediately.", self.seconds_until_label);
                Duration::ZERO
            }
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let api_url = std::env::var("GITHUB_API_URL").unwrap_or_else(|_| default_api_url());

        let mut cfg = config::Config::builder().set_default("apiurl", api_url)?;

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        cfg = cfg.add_source(config::Environment::with_prefix("INPUT"));

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.repo_token.is_empty() {
            return Err(anyhow::anyhow!("Input required and not supplied: repoToken"));
        }

        if result.label_name.is_empty() {
            return Err(anyhow::anyhow!("The label name must not be empty."));
        }

        Ok(result)
    }
}

/// Parse an integer prefix the way a lenient `parseInt` does: leading whitespace,
/// an optional sign, then as many digits as follow. Overflow saturates.
fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let magnitude = rest[..digits].bytes().fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));

    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_delay(seconds: &str) -> ConfigInner {
        ConfigInner {
            seconds_until_label: seconds.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn leading_int_follows_parse_int_rules() {
        assert_eq!(parse_leading_int("10"), Some(10));
        assert_eq!(parse_leading_int("  7s"), Some(7));
        assert_eq!(parse_leading_int("1.9"), Some(1));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int("-4"), Some(-4));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn label_delay_clamps_invalid_input_to_zero() {
        assert_eq!(with_delay("0").label_delay(), Duration::ZERO);
        assert_eq!(with_delay("15").label_delay(), Duration::from_secs(15));
        assert_eq!(with_delay("not a number").label_delay(), Duration::ZERO);
        assert_eq!(with_delay("-30").label_delay(), Duration::ZERO);
    }

    #[test]
    fn good_first_issue_requires_exact_true() {
        let mut inner = ConfigInner::default();
        assert!(!inner.good_first_issue_enabled());

        inner.good_first_issue = "TRUE".to_string();
        assert!(!inner.good_first_issue_enabled());

        inner.good_first_issue = "true".to_string();
        assert!(inner.good_first_issue_enabled());
    }

    /// `Config::load` reads the process environment; tests that call it hold this lock.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_temp_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("issue-labeler-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_reads_inputs_from_a_toml_file() {
        let _guard = env_lock();
        let path = write_temp_config("full", "eventtype = \"labeled\"\nrepotoken = \"t0k3n\"\nlabelname = \"needs-triage\"\ngoodfirstissue = \"true\"\n");

        let config = Config::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();

        assert_eq!(config.event_type, "labeled");
        assert_eq!(config.repo_token, "t0k3n");
        assert_eq!(config.label_name, "needs-triage");
        assert!(config.good_first_issue_enabled());
        assert_eq!(config.seconds_until_label, "0");
    }

    #[test]
    fn load_rejects_an_empty_label_name() {
        let _guard = env_lock();
        let path = write_temp_config("empty-label", "repotoken = \"t0k3n\"\nlabelname = \"\"\n");

        let config = Config::load(Some(&path));
        std::fs::remove_file(&path).unwrap();

        assert!(config.is_err());
    }

    #[test]
    fn load_reads_action_inputs_from_the_environment() {
        let _guard = env_lock();
        let path = write_temp_config("env", "eventtype = \"labeled\"\nrepotoken = \"file-token\"\nlabelname = \"needs-triage\"\n");
        let no_token = write_temp_config("env-no-token", "labelname = \"needs-triage\"\n");

        // SAFETY: every test touching these variables holds `ENV_LOCK`.
        unsafe {
            std::env::set_var("INPUT_EVENTTYPE", "opened");
            std::env::set_var("INPUT_REPOTOKEN", "env-token");
            std::env::set_var("INPUT_SECONDSUTILLABEL", "5");
        }
        let overridden = Config::load(Some(&path));

        unsafe { std::env::set_var("INPUT_REPOTOKEN", "") };
        let empty_token = Config::load(Some(&no_token));

        unsafe { std::env::remove_var("INPUT_REPOTOKEN") };
        let missing_token = Config::load(Some(&no_token));

        unsafe {
            std::env::remove_var("INPUT_EVENTTYPE");
            std::env::remove_var("INPUT_SECONDSUTILLABEL");
        }
        std::fs::remove_file(&path).unwrap();
        std::fs::remove_file(&no_token).unwrap();

        let config = overridden.unwrap();
        assert_eq!(config.event_type, "opened");
        assert_eq!(config.repo_token, "env-token");
        assert_eq!(config.label_name, "needs-triage");
        assert_eq!(config.label_delay(), Duration::from_secs(5));

        assert!(empty_token.is_err());
        assert!(missing_token.is_err());
    }

    #[test]
    fn defaults_match_the_action_inputs() {
        let inner = ConfigInner::default();

        assert_eq!(inner.label_name, "triage");
        assert_eq!(inner.seconds_until_label, "0");
        assert_eq!(inner.api_url, DEFAULT_API_URL);
    }
}
