use once_cell::sync::Lazy;

use crate::log::LogLevel;

const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_GAP_POLICY: GapPolicy = GapPolicy::Omit;
const DEFAULT_OWNER_NAME: &str = "PORTFOLIO";

static SITE_CONFIG: Lazy<SiteConfig> = Lazy::new(SiteConfig::from_build_env);

/// How the timeline treats years between the first and last authored year
/// that have no entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GapPolicy {
    Omit,
    Placeholder,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub owner_name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub log_level: LogLevel,
    pub gap_policy: GapPolicy,
}

impl SiteConfig {
    pub fn current() -> &'static SiteConfig {
        &SITE_CONFIG
    }

    /// Values are baked in by trunk/cargo at build time; the page has no
    /// runtime environment to read from.
    fn from_build_env() -> Self {
        Self::from_lookup(|name| match name {
            "PORTFOLIO_OWNER_NAME" => option_env!("PORTFOLIO_OWNER_NAME"),
            "PORTFOLIO_CONTACT_EMAIL" => option_env!("PORTFOLIO_CONTACT_EMAIL"),
            "PORTFOLIO_CONTACT_PHONE" => option_env!("PORTFOLIO_CONTACT_PHONE"),
            "PORTFOLIO_LOG_LEVEL" => option_env!("PORTFOLIO_LOG_LEVEL"),
            "PORTFOLIO_TIMELINE_GAPS" => option_env!("PORTFOLIO_TIMELINE_GAPS"),
            _ => None,
        })
    }

    pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let owner_name = parse_non_empty_string(&lookup, "PORTFOLIO_OWNER_NAME")
            .unwrap_or_else(|| DEFAULT_OWNER_NAME.to_string());
        let contact_email = parse_non_empty_string(&lookup, "PORTFOLIO_CONTACT_EMAIL");
        let contact_phone = parse_non_empty_string(&lookup, "PORTFOLIO_CONTACT_PHONE");
        let log_level = parse_log_level(&lookup, "PORTFOLIO_LOG_LEVEL", DEFAULT_LOG_LEVEL);
        let gap_policy = parse_gap_policy(&lookup, "PORTFOLIO_TIMELINE_GAPS", DEFAULT_GAP_POLICY);

        Self {
            owner_name,
            contact_email,
            contact_phone,
            log_level,
            gap_policy,
        }
    }
}

fn parse_non_empty_string<'a>(lookup: &impl Fn(&str) -> Option<&'a str>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level<'a>(
    lookup: &impl Fn(&str) -> Option<&'a str>,
    name: &str,
    default: LogLevel,
) -> LogLevel {
    match parse_non_empty_string(lookup, name)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" => LogLevel::Warn,
        _ => default,
    }
}

fn parse_gap_policy<'a>(
    lookup: &impl Fn(&str) -> Option<&'a str>,
    name: &str,
    default: GapPolicy,
) -> GapPolicy {
    match parse_non_empty_string(lookup, name)
        .map(|value| value.to_ascii_lowercase())
        .as_deref()
    {
        Some("placeholder") => GapPolicy::Placeholder,
        Some("omit") => GapPolicy::Omit,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = SiteConfig::from_lookup(|_| None);

        assert_eq!(config.owner_name, DEFAULT_OWNER_NAME);
        assert_eq!(config.contact_email, None);
        assert_eq!(config.contact_phone, None);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.gap_policy, GapPolicy::Omit);
    }

    #[test]
    fn contact_values_are_trimmed_and_blank_values_ignored() {
        let config = SiteConfig::from_lookup(|name| match name {
            "PORTFOLIO_CONTACT_EMAIL" => Some("  me@example.com "),
            "PORTFOLIO_CONTACT_PHONE" => Some("   "),
            _ => None,
        });

        assert_eq!(config.contact_email.as_deref(), Some("me@example.com"));
        assert_eq!(config.contact_phone, None);
    }

    #[test]
    fn known_values_are_case_insensitive_and_unknown_values_use_default() {
        let config = SiteConfig::from_lookup(|name| match name {
            "PORTFOLIO_LOG_LEVEL" => Some("DEBUG"),
            "PORTFOLIO_TIMELINE_GAPS" => Some("Placeholder"),
            _ => None,
        });
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.gap_policy, GapPolicy::Placeholder);

        let config = SiteConfig::from_lookup(|name| match name {
            "PORTFOLIO_LOG_LEVEL" => Some("verbose"),
            "PORTFOLIO_TIMELINE_GAPS" => Some("fill"),
            _ => None,
        });
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.gap_policy, GapPolicy::Omit);
    }
}
