use std::collections::BTreeMap;

use crate::config::GapPolicy;
use crate::content::TimelineEntry;

/// Which half of the row holds a card's text. The image takes the other half.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    ContentRight,
    ContentLeft,
}

impl Side {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::ContentRight
        } else {
            Self::ContentLeft
        }
    }

    pub fn row_class(self) -> &'static str {
        match self {
            Self::ContentRight => "card-row content-right",
            Self::ContentLeft => "card-row content-left",
        }
    }

    /// Horizontal direction the content slides in from before it is revealed.
    pub fn enter_class(self) -> &'static str {
        match self {
            Self::ContentRight => "enter-from-right",
            Self::ContentLeft => "enter-from-left",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedCard {
    pub entry: TimelineEntry,
    /// Position in the flattened rendered sequence across all years.
    pub index: usize,
    pub side: Side,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearSection {
    pub year: i32,
    pub cards: Vec<PlacedCard>,
}

impl YearSection {
    pub fn anchor_id(&self) -> String {
        year_anchor(self.year)
    }
}

pub fn year_anchor(year: i32) -> String {
    format!("year-{year}")
}

/// Groups entries by year (ascending), keeps storage order inside each year
/// and assigns sides from the absolute rendered position, so the zig-zag
/// continues across year boundaries.
pub fn build_sections(entries: &[TimelineEntry], gaps: GapPolicy) -> Vec<YearSection> {
    let mut groups: BTreeMap<i32, Vec<TimelineEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.year).or_default().push(*entry);
    }

    if gaps == GapPolicy::Placeholder {
        let bounds = groups
            .keys()
            .next()
            .copied()
            .zip(groups.keys().next_back().copied());
        if let Some((first, last)) = bounds {
            for year in first..=last {
                groups
                    .entry(year)
                    .or_insert_with(|| vec![TimelineEntry::placeholder(year)]);
            }
        }
    }

    let mut index = 0;
    groups
        .into_iter()
        .map(|(year, group)| {
            let cards = group
                .into_iter()
                .map(|entry| {
                    let card = PlacedCard {
                        entry,
                        index,
                        side: Side::for_index(index),
                    };
                    index += 1;
                    card
                })
                .collect();
            YearSection { year, cards }
        })
        .collect()
}

/// Years shown as jump links in the navigation bar: the first, the last and
/// every third year counted from the first.
pub fn nav_years(sections: &[YearSection]) -> Vec<i32> {
    let (Some(first), Some(last)) = (sections.first(), sections.last()) else {
        return Vec::new();
    };
    let (first, last) = (first.year, last.year);

    sections
        .iter()
        .map(|section| section.year)
        .filter(|year| *year == first || *year == last || (year - first) % 3 == 0)
        .collect()
}
