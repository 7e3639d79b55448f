//! Configuration precedence: explicit argument, then environment, then
//! whatever the SDK resolves on its own.
//!
//! The environment is read through [`EnvSource`] so callers (and tests) decide
//! where variables come from instead of reaching into process state.

use std::collections::BTreeMap;

pub const REGION_VARS: [&str; 2] = ["AWS_REGION", "AWS_DEFAULT_REGION"];
pub const PROFILE_VARS: [&str; 2] = ["AWS_PROFILE", "AWS_DEFAULT_PROFILE"];

pub trait EnvSource: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: BTreeMap<String, String>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for StaticEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl EnvSource for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Argument,
    Environment(&'static str),
    /// Left for the SDK's own provider chain.
    Deferred,
}

impl ValueSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Argument => "argument",
            Self::Environment(name) => name,
            Self::Deferred => "sdk_default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    pub value: Option<String>,
    pub source: ValueSource,
}

pub fn resolve_region(explicit: &str, env: &dyn EnvSource) -> ResolvedValue {
    resolve(explicit, &REGION_VARS, env)
}

pub fn resolve_profile(explicit: &str, env: &dyn EnvSource) -> ResolvedValue {
    resolve(explicit, &PROFILE_VARS, env)
}

fn resolve(explicit: &str, vars: &[&'static str], env: &dyn EnvSource) -> ResolvedValue {
    if !explicit.is_empty() {
        return ResolvedValue {
            value: Some(explicit.to_string()),
            source: ValueSource::Argument,
        };
    }

    for &name in vars {
        if let Some(value) = env.var(name).filter(|value| !value.trim().is_empty()) {
            return ResolvedValue {
                value: Some(value),
                source: ValueSource::Environment(name),
            };
        }
    }

    ResolvedValue {
        value: None,
        source: ValueSource::Deferred,
    }
}
