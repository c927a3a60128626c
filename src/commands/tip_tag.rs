use crate::areas::forest::Forest;
use crate::areas::repository::Repository;
use crate::artifacts::log::TIP_MARKER;
use crate::artifacts::tags::tag_sort::{tag_prefix, tag_sort};
use crate::artifacts::tags::tag_with_date::{TagWithDate, add_all_if_newer};
use crate::errors::TrackerError;
use chrono::Local;
use std::collections::{BTreeMap, HashSet};

impl Forest {
    /// Report the single most recent tag of the forest tip
    pub fn tip_tag(&self) -> anyhow::Result<()> {
        let now = Local::now().fixed_offset();
        let mut repositories = Vec::new();
        let mut all_tags = Vec::new();

        for dir in self.repository_dirs() {
            let repository = self.open_repository(&dir)?;
            add_all_if_newer(&mut all_tags, repository.just_list_tags(now));
            repositories.push(repository);
        }

        if let Some(tag) = direct_tag(&repositories) {
            return self.emit_result(&tag);
        }

        let winner = common_tip_tag(&repositories, all_tags).ok_or(TrackerError::NoCommonTag)?;
        self.emit_result(winner.tag())
    }
}

/// Tag every repository reaches before its history forks, if they all agree
pub fn direct_tag(repositories: &[Repository]) -> Option<String> {
    let mut tags = HashSet::new();
    for repository in repositories {
        tags.insert(repository.find_direct_tag()?.tag().to_string());
    }

    if tags.len() == 1 {
        tags.into_iter().next()
    } else {
        None
    }
}

/// Newest tag known to every repository
///
/// Tags are grouped by the text before their version number, so unrelated tag
/// families do not compete. Each family contributes its highest version
/// present everywhere; the newest of those wins.
pub fn common_tip_tag(repositories: &[Repository], mut tags: Vec<TagWithDate>) -> Option<TagWithDate> {
    tags.retain(|tag| tag.tag() != TIP_MARKER);

    tags.sort_by(TagWithDate::by_date);
    tracing::debug!("-------------");
    for tag in &tags {
        tracing::debug!("{}", tag);
    }

    tags.sort_by(|left, right| tag_sort(Some(left.tag()), Some(right.tag())));
    let mut families = BTreeMap::<&str, Vec<&TagWithDate>>::new();
    for tag in &tags {
        families.entry(tag_prefix(tag.tag())).or_default().push(tag);
    }
    tracing::debug!("-------------");
    for (prefix, family) in &families {
        tracing::debug!("{} - {}", prefix, family.len());
    }

    let mut winners = families
        .values()
        .filter_map(|family| {
            family
                .iter()
                .find(|tag| repositories.iter().all(|repo| repo.contains_tag(tag.tag())))
        })
        .map(|tag| (*tag).clone())
        .collect::<Vec<_>>();
    winners.sort_by(TagWithDate::by_date);

    winners.into_iter().next()
}
