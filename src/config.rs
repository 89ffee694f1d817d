//! Environment configuration

use std::str::FromStr;
use tracing::warn;

use crate::core::matched::NEUTRAL_RISK_ALLOCATION;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_COMMISSION_PERCENT: f64 = 6.5;

/// Values prefilled into calculators when the caller leaves them out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorDefaults {
    pub commission_percent: f64,
    pub risk_allocation: u8,
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        Self {
            commission_percent: DEFAULT_COMMISSION_PERCENT,
            risk_allocation: NEUTRAL_RISK_ALLOCATION,
        }
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub defaults: CalculatorDefaults,
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `DEFAULT_COMMISSION_PERCENT` and
    /// `DEFAULT_RISK_ALLOCATION` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unparsable values keep the default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fallback = CalculatorDefaults::default();

        let mut commission_percent =
            parse_or("DEFAULT_COMMISSION_PERCENT", &lookup, fallback.commission_percent);
        if !(0.0..100.0).contains(&commission_percent) {
            warn!(
                "DEFAULT_COMMISSION_PERCENT {} out of range, using {}",
                commission_percent, fallback.commission_percent
            );
            commission_percent = fallback.commission_percent;
        }

        let mut risk_allocation =
            parse_or("DEFAULT_RISK_ALLOCATION", &lookup, fallback.risk_allocation);
        if risk_allocation > 100 {
            warn!(
                "DEFAULT_RISK_ALLOCATION {} out of range, using {}",
                risk_allocation, fallback.risk_allocation
            );
            risk_allocation = fallback.risk_allocation;
        }

        Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", &lookup, DEFAULT_PORT),
            defaults: CalculatorDefaults {
                commission_percent,
                risk_allocation,
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("Invalid {} {:?}, using {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}
