use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitRule {
    const fn new(per_second: u64, burst_size: u32) -> Self {
        Self {
            per_second,
            burst_size,
        }
    }

    /// Parse a `"per_second,burst"` pair, e.g. `"5,10"`.
    fn parse(raw: &str) -> Option<Self> {
        let (per_second, burst) = raw.split_once(',')?;
        Some(Self {
            per_second: per_second.trim().parse().ok()?,
            burst_size: burst.trim().parse().ok()?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub auth: RateLimitRule,
    pub public_read: RateLimitRule,
    pub protected: RateLimitRule,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth: RateLimitRule::new(5, 10),
            public_read: RateLimitRule::new(30, 60),
            protected: RateLimitRule::new(10, 20),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.enabled = parse_bool_env("RATE_LIMIT_ENABLED", cfg.enabled);

        for (var, rule) in [
            ("RATE_LIMIT_AUTH", &mut cfg.auth),
            ("RATE_LIMIT_PUBLIC", &mut cfg.public_read),
            ("RATE_LIMIT_PROTECTED", &mut cfg.protected),
        ] {
            if let Ok(raw) = env::var(var) {
                match RateLimitRule::parse(&raw) {
                    Some(parsed) => *rule = parsed,
                    None => tracing::warn!("Invalid {} '{}', keeping default", var, raw),
                }
            }
        }

        cfg
    }
}

fn parse_bool_env(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .and_then(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" | "on" => Some(true),
            "0" | "false" | "no" | "n" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_parse_valid() {
        assert_eq!(
            RateLimitRule::parse("5,10"),
            Some(RateLimitRule::new(5, 10))
        );
        assert_eq!(
            RateLimitRule::parse(" 30 , 60 "),
            Some(RateLimitRule::new(30, 60))
        );
    }

    #[test]
    fn rule_parse_invalid() {
        assert_eq!(RateLimitRule::parse("5"), None);
        assert_eq!(RateLimitRule::parse("a,b"), None);
        assert_eq!(RateLimitRule::parse(""), None);
    }

    #[test]
    fn default_rules() {
        let cfg = RateLimitConfig::default();
        assert!(cfg.enabled);
        assert_eq!(cfg.auth, RateLimitRule::new(5, 10));
    }
}
