// Configuration module
// Internal representation of user configuration

use std::collections::HashMap;

use crate::core::session::Limits;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl Config {
    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    /// Get a setting value
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    /// Get boolean setting
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    /// Get integer setting
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    /// Get string setting
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| match v {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Positive integer setting as usize
    fn get_count(&self, key: &str) -> Option<usize> {
        self.get_int(key)
            .filter(|&n| n > 0)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Engine limits; missing or non-positive settings keep their defaults
    pub fn limits(&self) -> Limits {
        let defaults = Limits::default();
        Limits {
            max_lines: self.get_count("max-lines").unwrap_or(defaults.max_lines),
            max_line_len: self
                .get_count("max-line-length")
                .unwrap_or(defaults.max_line_len),
            replace_limit: self
                .get_count("replace-limit")
                .unwrap_or(defaults.replace_limit),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}
