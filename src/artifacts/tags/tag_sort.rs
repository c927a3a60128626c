//! Version-aware tag ordering
//!
//! Tags are compared by their runs of digits, most significant first, and the
//! *higher* version sorts first: `jdk-10` comes before `jdk-9`. When all shared
//! components are equal, the tag with more components wins, so suffixed
//! variants such as `aarch64-shenandoah-jdk8u172-b11` outrank the plain tag.
//! A missing tag sorts last.

use std::cmp::Ordering;

pub fn tag_sort(left: Option<&str>, right: Option<&str>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(left), Some(right)) => compare_tags(left, right),
    }
}

fn compare_tags(left: &str, right: &str) -> Ordering {
    let left = numeric_components(left);
    let right = numeric_components(right);

    left.iter()
        .zip(right.iter())
        .map(|(l, r)| compare_numbers(r, l))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| right.len().cmp(&left.len()))
}

fn numeric_components(tag: &str) -> Vec<&str> {
    tag.split(|c: char| !c.is_ascii_digit())
        .filter(|component| !component.is_empty())
        .collect()
}

/// Compare two digit runs by value, whatever their length
fn compare_numbers(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');

    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

/// Non-numeric prefix of a tag: everything before its first digit
///
/// `jdk8u172-b11` has prefix `jdk`, `aarch64-shenandoah-jdk8u` has `aarch`.
/// A tag made of digits only is its own prefix.
pub fn tag_prefix(tag: &str) -> &str {
    match tag.find(|c: char| c.is_ascii_digit()) {
        None => tag,
        Some(0) if tag.chars().all(|c| c.is_ascii_digit()) => tag,
        Some(position) => &tag[..position],
    }
}
