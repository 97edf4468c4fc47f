//! Настройки: необязательный TOML-файл и переменные окружения `ADB_*`.

use crate::{error::Result, model::FillPolicy};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "adb";
pub const ENV_PREFIX: &str = "ADB";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Метка перед каждой суммой в отчёте.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub fill_policy: FillPolicy,
}

fn default_currency() -> String {
    "PHP".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            fill_policy: FillPolicy::default(),
        }
    }
}

impl Settings {
    /// Явно переданный файл обязателен; `adb.toml` в рабочем каталоге — нет.
    /// Окружение перекрывает файл.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => ::config::File::from(p).required(true),
            None => ::config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let cfg = ::config::Config::builder()
            .add_source(file)
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}
