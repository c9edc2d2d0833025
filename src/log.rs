use std::cmp::Ordering;

use crate::config::SiteConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

pub fn log_event(level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < SiteConfig::current().log_level {
        return;
    }

    emit(level, &format_event(now_unix_millis(), level, event, fields));
}

fn format_event(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> String {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts)),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload).to_string()
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    match level {
        LogLevel::Warn => gloo::console::warn!(line),
        LogLevel::Debug | LogLevel::Info => gloo::console::log!(line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: &str) {
    eprintln!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_from_debug_to_warn() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
    }

    #[test]
    fn formatted_event_merges_fields_after_header() {
        let line = format_event(
            42,
            LogLevel::Info,
            "theme_toggled",
            serde_json::json!({ "theme": "dark" }),
        );
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("event is valid JSON");

        assert_eq!(parsed["ts"], 42);
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "theme_toggled");
        assert_eq!(parsed["theme"], "dark");
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let line = format_event(1, LogLevel::Warn, "locale_catalog_invalid", serde_json::Value::Null);
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("event is valid JSON");

        assert_eq!(parsed.as_object().map(|object| object.len()), Some(3));
    }
}
