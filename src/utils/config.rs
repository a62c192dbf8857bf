//! # Environment Configuration
//!
//! Declarative validation of the process environment. A [`Schema`] lists every
//! setting the service knows about; [`Config::load_from`] checks all of them in a
//! single pass and either returns an immutable [`Config`] or a [`ConfigError`]
//! naming every missing or invalid key.
//!
//! The validated record is stored once per process by [`init`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::env::{self, VarError};
use std::fmt;
use std::sync::OnceLock;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::utils::constant::*;
use crate::utils::secret::read_setting;

static CONFIG: OnceLock<Config> = OnceLock::new();

/// One entry of the settings schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingSpec {
    pub name: Cow<'static, str>,
    pub required: bool,
    /// Minimum length in characters. Required settings use 1.
    pub min_len: usize,
    /// Values shorter than this are accepted with a warning.
    pub recommended_len: Option<usize>,
    /// Value used when an optional setting is absent or empty.
    pub default: Option<&'static str>,
}

impl SettingSpec {
    pub fn required(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            required: true,
            min_len: 1,
            recommended_len: None,
            default: None,
        }
    }

    pub fn optional(name: impl Into<Cow<'static, str>>, default: Option<&'static str>) -> Self {
        Self {
            name: name.into(),
            required: false,
            min_len: 1,
            recommended_len: None,
            default,
        }
    }

    pub fn min_len(mut self, len: usize) -> Self {
        self.min_len = len;
        self
    }

    pub fn recommended_len(mut self, len: usize) -> Self {
        self.recommended_len = Some(len);
        self
    }
}

/// Ordered list of settings validated by [`Config::load_from`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    settings: Vec<SettingSpec>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// The schema of the DovvyBuddy service: every key in [`REQUIRED_ENV`]
    /// plus the optional `APP_ENV` and `BIND_ADDR`.
    pub fn application() -> Self {
        let mut schema = Self::new();
        for &name in REQUIRED_ENV {
            let spec = if name == "SESSION_SECRET" {
                SettingSpec::required(name).recommended_len(SESSION_SECRET_RECOMMENDED_LEN)
            } else {
                SettingSpec::required(name)
            };
            schema = schema.with(spec);
        }
        schema
            .with(SettingSpec::optional("APP_ENV", Some(DEFAULT_APP_ENV)))
            .with(SettingSpec::optional("BIND_ADDR", Some(DEFAULT_BIND_ADDR)))
    }

    /// Adds a setting, replacing any existing entry with the same name.
    pub fn with(mut self, spec: SettingSpec) -> Self {
        match self.settings.iter_mut().find(|s| s.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.settings.push(spec),
        }
        self
    }

    /// Marks `name` as required, adding it if the schema does not know it yet.
    pub fn require(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        match self.settings.iter_mut().find(|s| s.name == name) {
            Some(existing) => {
                existing.required = true;
                existing.default = None;
                existing.min_len = existing.min_len.max(1);
            }
            None => self.settings.push(SettingSpec::required(name)),
        }
        self
    }

    pub fn settings(&self) -> &[SettingSpec] {
        &self.settings
    }
}

/// Why a setting failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationReason {
    Missing,
    Empty,
    TooShort { min: usize },
    NotUnicode,
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationReason::Missing => f.write_str("missing"),
            ViolationReason::Empty => f.write_str("empty"),
            ViolationReason::TooShort { min } => write!(f, "shorter than {min} characters"),
            ViolationReason::NotUnicode => f.write_str("not valid unicode"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub key: String,
    pub reason: ViolationReason,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.reason)
    }
}

/// Returned when one or more settings are missing or invalid.
///
/// The message lists every violation, one per line, so that a misconfigured
/// deployment can be fixed in one pass.
#[derive(Debug, Error)]
#[error("environment validation failed:\n{}", list_violations(.violations))]
pub struct ConfigError {
    violations: Vec<Violation>,
}

impl ConfigError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

fn list_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validated, immutable configuration record.
///
/// Values are kept as [`SecretString`] so the `Debug` output of a config never
/// contains credentials.
#[derive(Debug)]
pub struct Config {
    values: BTreeMap<String, SecretString>,
}

impl Config {
    /// Validates the process environment against [`Schema::application`],
    /// extended by the keys listed in `EXTRA_REQUIRED_ENV`.
    ///
    /// Each setting may instead be supplied as a file path in `<NAME>_FILE`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|var| env::var(var))
    }

    /// Same as [`Config::load`], reading variables through `get_var`.
    ///
    /// An `EXTRA_REQUIRED_ENV` that is not valid unicode is itself a violation,
    /// since the keys it names could not be required.
    pub fn load_with<F>(get_var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let mut schema = Schema::application();
        let mut extra_violation = None;
        match get_var(EXTRA_REQUIRED_ENV) {
            Ok(extra) => {
                for name in extra.split(':').map(str::trim).filter(|n| !n.is_empty()) {
                    schema = schema.require(name.to_owned());
                }
            }
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(_)) => {
                extra_violation = Some(Violation {
                    key: EXTRA_REQUIRED_ENV.to_owned(),
                    reason: ViolationReason::NotUnicode,
                });
            }
        }

        let result = Self::load_from(&schema, |key| read_setting(key, &get_var));
        match (result, extra_violation) {
            (result, None) => result,
            (Ok(_), Some(violation)) => Err(ConfigError {
                violations: vec![violation],
            }),
            (Err(mut e), Some(violation)) => {
                e.violations.insert(0, violation);
                Err(e)
            }
        }
    }

    /// Validates the values returned by `lookup` against `schema`.
    ///
    /// Every setting is checked before returning, so the error reports all
    /// violations at once.
    #[instrument(skip_all, fields(settings = schema.settings().len()))]
    pub fn load_from<F>(schema: &Schema, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let mut values = BTreeMap::new();
        let mut violations = Vec::new();

        for spec in schema.settings() {
            let key: &str = &spec.name;
            let raw = match lookup(key) {
                Ok(value) => Some(value),
                Err(VarError::NotPresent) => None,
                Err(VarError::NotUnicode(_)) => {
                    violations.push(Violation {
                        key: key.to_owned(),
                        reason: ViolationReason::NotUnicode,
                    });
                    continue;
                }
            };

            // optional settings treat an empty value as unset
            let raw = raw.filter(|v| spec.required || !v.is_empty());

            let Some(value) = raw else {
                if spec.required {
                    violations.push(Violation {
                        key: key.to_owned(),
                        reason: ViolationReason::Missing,
                    });
                } else if let Some(default) = spec.default {
                    debug!(key, default, "Using default for unset setting");
                    values.insert(key.to_owned(), SecretString::from(default.to_owned()));
                }
                continue;
            };

            let len = value.chars().count();
            if len < spec.min_len {
                let reason = if value.is_empty() {
                    ViolationReason::Empty
                } else {
                    ViolationReason::TooShort { min: spec.min_len }
                };
                violations.push(Violation {
                    key: key.to_owned(),
                    reason,
                });
                continue;
            }

            if let Some(recommended) = spec.recommended_len {
                if len < recommended {
                    warn!(key, len, recommended, "Setting is shorter than recommended");
                }
            }

            values.insert(key.to_owned(), SecretString::from(value));
        }

        if !violations.is_empty() {
            return Err(ConfigError { violations });
        }

        info!(count = values.len(), "Environment validated");
        Ok(Self { values })
    }

    /// Returns the value of `name`, if the schema knew it and it was set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|v| v.expose_secret())
    }

    pub fn database_url(&self) -> Option<&str> {
        self.get("DATABASE_URL")
    }

    pub fn app_url(&self) -> Option<&str> {
        self.get("NEXT_PUBLIC_APP_URL")
    }

    pub fn session_secret(&self) -> Option<&SecretString> {
        self.values.get("SESSION_SECRET")
    }

    pub fn app_env(&self) -> &str {
        self.get("APP_ENV").unwrap_or(DEFAULT_APP_ENV)
    }

    pub fn bind_addr(&self) -> &str {
        self.get("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Number of settings held by the record.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of all settings held by the record.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Validates the process environment once and keeps the record for the
/// lifetime of the process.
///
/// Later calls return the stored record without reading the environment again.
pub fn init() -> Result<&'static Config, ConfigError> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = Config::load()?;
    Ok(CONFIG.get_or_init(|| config))
}
