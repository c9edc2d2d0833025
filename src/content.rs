//! Author-maintained content. Everything displayed for an entry is looked up
//! through the localization catalogs by `key`; this table only fixes the year,
//! the order and the artwork.

/// Key of the synthesized entry used for years without authored content.
pub const PLACEHOLDER_KEY: &str = "placeholder";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineEntry {
    pub year: i32,
    pub key: &'static str,
    pub image: Option<&'static str>,
}

impl TimelineEntry {
    pub const fn new(year: i32, key: &'static str, image: &'static str) -> Self {
        Self {
            year,
            key,
            image: Some(image),
        }
    }

    pub const fn placeholder(year: i32) -> Self {
        Self {
            year,
            key: PLACEHOLDER_KEY,
            image: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.key == PLACEHOLDER_KEY
    }
}

/// Storage order matters: it decides the order of entries within a year.
pub const CONTENT_TABLE: &[TimelineEntry] = &[
    TimelineEntry::new(2021, "healthCalendar", "/images/health-calendar.webp"),
    TimelineEntry::new(2022, "homeLoan", "/images/home-loan.webp"),
    TimelineEntry::new(2022, "garbageAI", "/images/garbage-ai.webp"),
    TimelineEntry::new(2023, "bleControl", "/images/ble-control.webp"),
    TimelineEntry::new(2023, "internship", "/images/internship.webp"),
    TimelineEntry::new(2024, "seniorProject", "/images/senior-project.webp"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DownloadOption {
    pub label_key: &'static str,
    pub file: &'static str,
}

pub const DOWNLOAD_OPTIONS: &[DownloadOption] = &[
    DownloadOption {
        label_key: "nav.cv",
        file: "/files/cv.pdf",
    },
    DownloadOption {
        label_key: "nav.resume",
        file: "/files/resume.pdf",
    },
];
