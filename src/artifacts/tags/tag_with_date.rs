//! Newest known date of a tag
//!
//! Used by the tip-tag query only. Two values are the same tag when their names
//! match, whatever their dates; ordering is by date, newest first.

use crate::artifacts::log::log_item::LogItem;
use crate::artifacts::tags::tag_commit::ISO_OUTPUT_FORMAT;
use chrono::{DateTime, FixedOffset};
use derive_new::new;
use std::cmp::Ordering;

#[derive(Debug, Clone, new)]
pub struct TagWithDate {
    tag: String,
    date: DateTime<FixedOffset>,
}

impl TagWithDate {
    /// `None` for untagged entries
    pub fn from_item(item: &LogItem) -> Option<Self> {
        item.tag()
            .map(|tag| TagWithDate::new(tag.to_string(), item.date()))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    /// Newest first
    pub fn by_date(&self, other: &Self) -> Ordering {
        other.date.cmp(&self.date)
    }
}

impl PartialEq for TagWithDate {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for TagWithDate {}

impl std::hash::Hash for TagWithDate {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
    }
}

impl std::fmt::Display for TagWithDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}  {}", self.tag, self.date.format(ISO_OUTPUT_FORMAT))
    }
}

/// Record `candidate` unless the same tag is already known with a newer date
pub fn add_if_newer(tags: &mut Vec<TagWithDate>, candidate: TagWithDate) {
    match tags.iter_mut().find(|known| **known == candidate) {
        Some(known) => {
            if candidate.date > known.date {
                *known = candidate;
            }
        }
        None => tags.push(candidate),
    }
}

pub fn add_all_if_newer(tags: &mut Vec<TagWithDate>, candidates: Vec<TagWithDate>) {
    for candidate in candidates {
        add_if_newer(tags, candidate);
    }
}
