//! Key → text resolution for the two display languages.
//!
//! Catalogs are nested JSON objects addressed with dotted keys such as
//! `timeline.homeLoan.title`. A lookup tries the active language, then
//! English, then gives back the key itself, so one missing string never
//! takes a whole card down with it.

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;

use crate::error::LocaleError;
use crate::log::{log_event, LogLevel};

static EN_CATALOG: Lazy<Catalog> = Lazy::new(|| load_catalog(Language::En, include_str!("../locales/en.json")));
static TH_CATALOG: Lazy<Catalog> = Lazy::new(|| load_catalog(Language::Th, include_str!("../locales/th.json")));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    En,
    Th,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Th => "th",
        }
    }

    /// Picks the display language from a BCP 47 tag such as `th-TH`.
    pub fn detect(tag: Option<&str>) -> Self {
        match tag.map(|value| value.trim().to_ascii_lowercase()) {
            Some(value) if value == "th" || value.starts_with("th-") => Self::Th,
            _ => Self::En,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Th,
            Self::Th => Self::En,
        }
    }

    /// Short label of the language a switch control would change to.
    pub fn switch_label(self) -> &'static str {
        match self.toggled() {
            Self::En => "EN",
            Self::Th => "TH",
        }
    }
}

#[derive(Debug, Default)]
pub struct Catalog {
    root: serde_json::Map<String, Value>,
}

impl Catalog {
    pub fn parse(language: Language, raw: &str) -> Result<Self, LocaleError> {
        let value: Value = serde_json::from_str(raw).map_err(|source| LocaleError::InvalidJson {
            language: language.code(),
            source,
        })?;

        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(LocaleError::NotAnObject {
                language: language.code(),
            }),
        }
    }

    fn get(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let mut current = self.root.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

fn load_catalog(language: Language, source: &str) -> Catalog {
    Catalog::parse(language, source).unwrap_or_else(|err| {
        log_event(
            LogLevel::Warn,
            "locale_catalog_invalid",
            serde_json::json!({ "language": language.code(), "error": err.to_string() }),
        );
        Catalog::default()
    })
}

fn bundled_catalog(language: Language) -> &'static Catalog {
    match language {
        Language::En => &EN_CATALOG,
        Language::Th => &TH_CATALOG,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub as_list: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    Text(String),
    List(Vec<String>),
}

#[derive(Clone, Copy)]
pub struct Localizer {
    language: Language,
    active: &'static Catalog,
    fallback: &'static Catalog,
}

impl PartialEq for Localizer {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language
    }
}

impl Localizer {
    pub fn new(language: Language) -> Self {
        Self::with_catalogs(language, bundled_catalog(language), bundled_catalog(Language::En))
    }

    fn with_catalogs(language: Language, active: &'static Catalog, fallback: &'static Catalog) -> Self {
        Self {
            language,
            active,
            fallback,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn lookup(&self, key: &str) -> Option<&'static Value> {
        let found = self.active.get(key).or_else(|| self.fallback.get(key));
        if found.is_none() {
            log_event(
                LogLevel::Debug,
                "localization_missing",
                serde_json::json!({ "key": key, "language": self.language.code() }),
            );
        }
        found
    }

    pub fn text(&self, key: &str) -> String {
        self.lookup(key)
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    pub fn text_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        interpolate(&self.text(key), params)
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        self.lookup(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn links(&self, key: &str) -> Vec<Link> {
        self.lookup(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| Link::deserialize(item).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn resolve(&self, key: &str, options: ResolveOptions) -> Resolved {
        if options.as_list {
            Resolved::List(self.list(key))
        } else {
            Resolved::Text(self.text(key))
        }
    }
}

pub fn entry_key(entry_key: &str, field: &str) -> String {
    format!("timeline.{entry_key}.{field}")
}

pub fn interpolate(text: &str, params: &[(&str, &str)]) -> String {
    params.iter().fold(text.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{{{name}}}}}"), value)
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Emphasis(String),
}

/// Splits numbered markers like `<1>…</1>` out of a translated string.
/// Unmatched markers are kept as literal text.
pub fn segments(text: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let Some(close) = after.find('>') else {
            break;
        };
        let tag = &after[..close];
        if tag.is_empty() || !tag.bytes().all(|byte| byte.is_ascii_digit()) {
            push_plain(&mut out, &rest[..start + 1]);
            rest = &rest[start + 1..];
            continue;
        }

        let body_start = start + 1 + close + 1;
        let closing = format!("</{tag}>");
        let Some(body_len) = rest[body_start..].find(&closing) else {
            push_plain(&mut out, &rest[..body_start]);
            rest = &rest[body_start..];
            continue;
        };

        push_plain(&mut out, &rest[..start]);
        out.push(Segment::Emphasis(rest[body_start..body_start + body_len].to_string()));
        rest = &rest[body_start + body_len + closing.len()..];
    }

    push_plain(&mut out, rest);
    out
}

fn push_plain(out: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Plain(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(Segment::Plain(text.to_string()));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkIcon {
    Repository,
    Book,
    External,
}

impl LinkIcon {
    pub fn for_label(label: &str) -> Self {
        if label.contains("GitHub") {
            Self::Repository
        } else if label.contains("Book") {
            Self::Book
        } else {
            Self::External
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Repository => "⌥",
            Self::Book => "❐",
            Self::External => "↗",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaked(language: Language, source: &str) -> &'static Catalog {
        Box::leak(Box::new(Catalog::parse(language, source).expect("test catalog parses")))
    }

    fn test_localizer() -> Localizer {
        let english = leaked(
            Language::En,
            r#"{
                "nav": { "download": "Download" },
                "footer": { "copyright": "© {{year}} {{name}}" },
                "timeline": {
                    "a": {
                        "title": "Alpha",
                        "items": ["one", "two"],
                        "links": [
                            { "label": "GitHub Repository", "url": "https://example.com/a" },
                            { "label": 7 }
                        ]
                    }
                }
            }"#,
        );
        let thai = leaked(Language::Th, r#"{ "nav": { "download": "ดาวน์โหลด" } }"#);
        Localizer::with_catalogs(Language::Th, thai, english)
    }

    #[test]
    fn detect_recognises_thai_tags_only() {
        assert_eq!(Language::detect(Some("th")), Language::Th);
        assert_eq!(Language::detect(Some("th-TH")), Language::Th);
        assert_eq!(Language::detect(Some("en-US")), Language::En);
        assert_eq!(Language::detect(Some("thx")), Language::En);
        assert_eq!(Language::detect(None), Language::En);
    }

    #[test]
    fn active_language_wins_then_english_then_key() {
        let localizer = test_localizer();

        assert_eq!(localizer.text("nav.download"), "ดาวน์โหลด");
        assert_eq!(localizer.text("timeline.a.title"), "Alpha");
        assert_eq!(localizer.text("timeline.missing.title"), "timeline.missing.title");
    }

    #[test]
    fn non_string_value_falls_back_to_key() {
        let localizer = test_localizer();

        assert_eq!(localizer.text("timeline.a.items"), "timeline.a.items");
        assert_eq!(localizer.text("timeline.a"), "timeline.a");
    }

    #[test]
    fn lists_and_links_degrade_to_empty() {
        let localizer = test_localizer();

        assert_eq!(localizer.list("timeline.a.items"), vec!["one", "two"]);
        assert!(localizer.list("timeline.a.title").is_empty());
        assert!(localizer.list("timeline.b.items").is_empty());

        let links = localizer.links("timeline.a.links");
        assert_eq!(
            links,
            vec![Link {
                label: "GitHub Repository".to_string(),
                url: "https://example.com/a".to_string(),
            }]
        );
        assert!(localizer.links("timeline.b.links").is_empty());
    }

    #[test]
    fn resolve_honours_list_option() {
        let localizer = test_localizer();

        assert_eq!(
            localizer.resolve("timeline.a.title", ResolveOptions::default()),
            Resolved::Text("Alpha".to_string())
        );
        assert_eq!(
            localizer.resolve("timeline.a.items", ResolveOptions { as_list: true }),
            Resolved::List(vec!["one".to_string(), "two".to_string()])
        );
    }

    #[test]
    fn text_with_substitutes_named_parameters() {
        let localizer = test_localizer();

        assert_eq!(
            localizer.text_with("footer.copyright", &[("year", "2025"), ("name", "Portfolio")]),
            "© 2025 Portfolio"
        );
        assert_eq!(interpolate("Year {{year}}", &[]), "Year {{year}}");
    }

    #[test]
    fn invalid_catalogs_are_rejected() {
        assert!(matches!(
            Catalog::parse(Language::En, "{ nope"),
            Err(LocaleError::InvalidJson { .. })
        ));
        assert!(matches!(
            Catalog::parse(Language::Th, "[1, 2]"),
            Err(LocaleError::NotAnObject { language: "th" })
        ));
    }

    #[test]
    fn bundled_catalogs_cover_every_authored_entry() {
        for language in [Language::En, Language::Th] {
            let localizer = Localizer::new(language);
            for entry in crate::content::CONTENT_TABLE {
                let title_key = entry_key(entry.key, "title");
                assert_ne!(localizer.text(&title_key), title_key, "{language:?} {}", entry.key);
                assert!(!localizer.list(&entry_key(entry.key, "items")).is_empty());
                assert!(!localizer.links(&entry_key(entry.key, "links")).is_empty());
            }
        }
    }

    #[test]
    fn segments_split_numbered_emphasis() {
        assert_eq!(
            segments("Graduated with <1>honors</1> from KKU."),
            vec![
                Segment::Plain("Graduated with ".to_string()),
                Segment::Emphasis("honors".to_string()),
                Segment::Plain(" from KKU.".to_string()),
            ]
        );
    }

    #[test]
    fn segments_keep_unmatched_markup_literal() {
        assert_eq!(
            segments("a < b and <1>open"),
            vec![Segment::Plain("a < b and <1>open".to_string())]
        );
        assert!(segments("").is_empty());
    }

    #[test]
    fn link_icon_follows_label() {
        assert_eq!(LinkIcon::for_label("GitHub Repository"), LinkIcon::Repository);
        assert_eq!(LinkIcon::for_label("Book Link"), LinkIcon::Book);
        assert_eq!(LinkIcon::for_label("Full Report"), LinkIcon::External);
    }
}
