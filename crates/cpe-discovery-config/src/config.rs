// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

static CONFIG: OnceCell<RwLock<Arc<Config>>> = OnceCell::new();

/// NVD upstream connection settings (§6 "Configuration surface").
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Nvd {
    /// Attached via the `apiKey` header when present; also lowers the
    /// recommended default `min_interval_ms` from 6000 to 600.
    pub api_key: Option<String>,
    /// Minimum interval, in milliseconds, between outbound catalog calls.
    pub min_interval_ms: u64,
}

impl Default for Nvd {
    fn default() -> Self {
        Nvd {
            api_key: None,
            min_interval_ms: 6_000,
        }
    }
}

/// Request cache settings.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Cache {
    pub ttl_secs: u64,
}

impl Default for Cache {
    fn default() -> Self {
        Cache { ttl_secs: 300 }
    }
}

/// Progressive search orchestrator settings.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Search {
    pub narrow_target: usize,
}

impl Default for Search {
    fn default() -> Self {
        Search { narrow_target: 10 }
    }
}

/// The four scoring weights from §4.H; must sum to 1.0 ([`Config::validate`]
/// checks this, it is not enforced by `serde` alone).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Weights {
    pub vendor: f64,
    pub product: f64,
    pub version: f64,
    pub token_overlap: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            vendor: 0.25,
            product: 0.35,
            version: 0.25,
            token_overlap: 0.15,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Scoring {
    pub weights: Weights,
}

impl Default for Scoring {
    fn default() -> Self {
        Scoring {
            weights: Weights::default(),
        }
    }
}

/// Caller-facing `topN` cap.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TopN {
    pub max: usize,
}

impl Default for TopN {
    fn default() -> Self {
        TopN { max: 20 }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Ranking {
    pub top_n: TopN,
}

impl Default for Ranking {
    fn default() -> Self {
        Ranking {
            top_n: TopN::default(),
        }
    }
}

/// The full §6 configuration surface for the discovery pipeline.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub nvd: Nvd,
    pub cache: Cache,
    pub search: Search,
    pub scoring: Scoring,
    pub ranking: Ranking,
}

impl Config {
    /// Get the current process-wide config, loading it from the
    /// environment if it hasn't been loaded yet.
    pub fn current() -> Result<Arc<Self>> {
        get_config()
    }

    /// Loads configuration from scratch (defaults + environment),
    /// without consulting or updating the process-wide cell.
    pub fn load() -> Result<Self> {
        load_config()
    }

    /// Installs `self` as the process-wide current config.
    pub fn make_current(self) -> Result<Arc<Self>> {
        self.validate()?;
        let cell = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
            Ok(RwLock::new(Arc::new(self.clone())))
        })?;
        let mut lock = cell
            .write()
            .map_err(|err| Error::LockPoisonedWrite(err.to_string()))?;
        *Arc::make_mut(&mut lock) = self;
        Ok(Arc::clone(&lock))
    }

    /// Checks the invariants the `config` crate's deserializer can't
    /// express on its own: the four scoring weights must sum to 1.0
    /// (within floating-point tolerance) and `topN.max` must be positive.
    pub fn validate(&self) -> Result<()> {
        let w = &self.scoring.weights;
        let sum = w.vendor + w.product + w.version + w.token_overlap;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(Error::WeightsDoNotSumToOne(sum));
        }
        if self.ranking.top_n.max == 0 {
            return Err(Error::TopNMaxNotPositive(self.ranking.top_n.max));
        }
        Ok(())
    }
}

/// Gets the current process-wide config, loading it from the environment
/// on first access.
pub fn get_config() -> Result<Arc<Config>> {
    let cell = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
        Ok(RwLock::new(Arc::new(load_config()?)))
    })?;
    let lock = cell
        .read()
        .map_err(|err| Error::LockPoisonedRead(err.to_string()))?;
    Ok(Arc::clone(&lock))
}

/// Loads configuration from built-in defaults overlaid with any
/// `CPE_DISCOVERY_<SECTION>_<NAME>` environment variables, ignoring
/// variables with no section (e.g. a bare `CPE_DISCOVERY_LOG`).
pub fn load_config() -> Result<Config> {
    use config::{Config as RawConfig, File};

    let mut builder = RawConfig::builder()
        .add_source(File::with_name("/etc/cpe-discovery").required(false))
        .add_source(File::with_name("cpe-discovery").required(false));

    for (var, value) in std::env::vars() {
        let Some(tail) = var.strip_prefix("CPE_DISCOVERY_") else {
            continue;
        };
        let Some((section, name)) = tail.split_once('_') else {
            continue;
        };
        let key = format!("{}.{}", section.to_lowercase(), name.to_lowercase());
        builder = builder.set_override(key, value)?;
    }

    let raw = builder.build()?;
    let config: Config = raw.try_deserialize().unwrap_or_default();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_section_6() {
        let config = Config::default();
        assert_eq!(config.nvd.min_interval_ms, 6_000);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.search.narrow_target, 10);
        assert_eq!(config.ranking.top_n.max, 20);
        assert_eq!(config.scoring.weights.vendor, 0.25);
        assert_eq!(config.scoring.weights.product, 0.35);
        assert_eq!(config.scoring.weights.version, 0.25);
        assert_eq!(config.scoring.weights.token_overlap, 0.15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let mut config = Config::default();
        config.scoring.weights.vendor = 0.9;
        assert!(matches!(
            config.validate(),
            Err(Error::WeightsDoNotSumToOne(_))
        ));
    }

    #[test]
    fn rejects_zero_top_n_max() {
        let mut config = Config::default();
        config.ranking.top_n.max = 0;
        assert!(matches!(
            config.validate(),
            Err(Error::TopNMaxNotPositive(0))
        ));
    }

    #[test]
    fn load_config_falls_back_to_defaults_without_files_or_env() {
        let config = load_config().expect("loads");
        assert_eq!(config, Config::default());
    }
}
