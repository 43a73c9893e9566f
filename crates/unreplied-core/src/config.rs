use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::{info, warn};

use crate::{domain::Token, errors::Error, settings::Settings, Result};

const DEFAULT_ENV_FILE: &str = "env/.env";
const DEFAULT_SETTINGS_PATH: &str = "settings/setting.json";
const DEFAULT_LOOKBACK_HOURS: u64 = 24;

/// Process configuration resolved from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub token: Token,

    // Settings files
    pub settings_path: PathBuf,
    pub post_settings_path: Option<PathBuf>,

    // Runtime
    pub lookback: Duration,
    pub http_timeout: Option<Duration>,
}

/// Settings for both halves of a run.
///
/// `post` is a copy of `fetch` unless a separate post-side file is configured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSettings {
    pub fetch: Settings,
    pub post: Settings,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_file = env_path("ENV_FILE").unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE));
        if !load_dotenv_if_present(&env_file) {
            warn!(path = %env_file.display(), "Error loading env file, using process environment");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup (the process env in `load`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Not validated: an unset token is sent as an empty string.
        let token = Token::new(lookup("TOKEN").unwrap_or_default());
        if token.is_empty() {
            warn!("TOKEN is not set; requests will carry an empty credential");
        }

        let settings_path = lookup("SETTINGS_PATH")
            .and_then(non_empty)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
        let post_settings_path = lookup("POST_SETTINGS_PATH")
            .and_then(non_empty)
            .map(PathBuf::from);

        let lookback_hours =
            parse_u64("LOOKBACK_HOURS", lookup("LOOKBACK_HOURS"))?.unwrap_or(DEFAULT_LOOKBACK_HOURS);
        let lookback = Duration::from_secs(lookback_hours.saturating_mul(3600));

        let http_timeout =
            parse_u64("HTTP_TIMEOUT_SECS", lookup("HTTP_TIMEOUT_SECS"))?.map(Duration::from_secs);

        Ok(Self {
            token,
            settings_path,
            post_settings_path,
            lookback,
            http_timeout,
        })
    }

    /// Read the settings file(s) once for this run.
    pub fn load_settings(&self) -> Result<RunSettings> {
        let fetch = Settings::load(&self.settings_path)?;
        let post = match &self.post_settings_path {
            Some(p) if p != &self.settings_path => {
                info!(path = %p.display(), "using separate settings for posting");
                Settings::load(p)?
            }
            _ => fetch.clone(),
        };
        Ok(RunSettings { fetch, post })
    }
}

/// Load `KEY=VALUE` lines into the process env, keeping existing values.
///
/// Returns `false` when the file could not be read.
fn load_dotenv_if_present(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
    true
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim().trim_start_matches("export ").trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_u64(key: &str, value: Option<String>) -> Result<Option<u64>> {
    let Some(raw) = value.and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| Error::Config(format!("{key} must be a non-negative integer, got {raw:?}")))
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert!(cfg.token.is_empty());
        assert_eq!(cfg.settings_path, PathBuf::from("settings/setting.json"));
        assert_eq!(cfg.post_settings_path, None);
        assert_eq!(cfg.lookback, Duration::from_secs(24 * 3600));
        assert_eq!(cfg.http_timeout, None);
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("TOKEN", "xoxb-1"),
            ("SETTINGS_PATH", "a.json"),
            ("POST_SETTINGS_PATH", "setting.json"),
            ("LOOKBACK_HOURS", "48"),
            ("HTTP_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(cfg.token.as_str(), "xoxb-1");
        assert_eq!(cfg.settings_path, PathBuf::from("a.json"));
        assert_eq!(cfg.post_settings_path, Some(PathBuf::from("setting.json")));
        assert_eq!(cfg.lookback, Duration::from_secs(48 * 3600));
        assert_eq!(cfg.http_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn invalid_number_is_config_error() {
        let err = Config::from_lookup(lookup(&[("LOOKBACK_HOURS", "a day")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("LOOKBACK_HOURS"));
    }

    #[test]
    fn parses_dotenv_lines() {
        let parsed = parse_dotenv(
            "# comment\n\nTOKEN=\"xoxb-abc\"\nexport OTHER = 'v=1'\nnot a pair\n=novalue\n",
        );
        assert_eq!(
            parsed,
            vec![
                ("TOKEN".to_string(), "xoxb-abc".to_string()),
                ("OTHER".to_string(), "v=1".to_string()),
            ]
        );
    }

    #[test]
    fn missing_dotenv_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!load_dotenv_if_present(&dir.path().join(".env")));
    }

    #[test]
    fn dotenv_does_not_override_existing_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "UNREPLIED_TEST_DOTENV_NEW=from-file\nUNREPLIED_TEST_DOTENV_KEEP=from-file\n",
        )
        .unwrap();
        env::set_var("UNREPLIED_TEST_DOTENV_KEEP", "from-env");

        assert!(load_dotenv_if_present(&path));
        assert_eq!(env::var("UNREPLIED_TEST_DOTENV_NEW").unwrap(), "from-file");
        assert_eq!(env::var("UNREPLIED_TEST_DOTENV_KEEP").unwrap(), "from-env");
    }

    #[test]
    fn load_reads_token_from_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "# local secrets\nTOKEN=xoxb-from-file\n").unwrap();
        env::remove_var("TOKEN");
        env::set_var("ENV_FILE", &path);

        let cfg = Config::load().unwrap();
        env::remove_var("ENV_FILE");
        env::remove_var("TOKEN");

        assert_eq!(cfg.token.as_str(), "xoxb-from-file");
    }

    #[test]
    fn post_settings_fall_back_to_fetch_settings() {
        let dir = tempfile::tempdir().unwrap();
        let fetch = dir.path().join("setting.json");
        std::fs::write(&fetch, r#"{"monitoredChannel":"C1","sendTo":"C2"}"#).unwrap();

        let mut cfg = Config::from_lookup(lookup(&[])).unwrap();
        cfg.settings_path = fetch.clone();
        let run = cfg.load_settings().unwrap();
        assert_eq!(run.fetch, run.post);

        let post = dir.path().join("post.json");
        std::fs::write(&post, r#"{"sendTo":"C3"}"#).unwrap();
        cfg.post_settings_path = Some(post);
        let run = cfg.load_settings().unwrap();
        assert_eq!(run.fetch.send_to, "C2");
        assert_eq!(run.post.send_to, "C3");
    }

    #[test]
    fn missing_post_settings_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let fetch = dir.path().join("setting.json");
        std::fs::write(&fetch, "{}").unwrap();

        let mut cfg = Config::from_lookup(lookup(&[])).unwrap();
        cfg.settings_path = fetch;
        cfg.post_settings_path = Some(dir.path().join("missing.json"));
        assert!(matches!(cfg.load_settings(), Err(Error::Settings { .. })));
    }
}
