use crate::artifacts::log::changeset_id::ChangesetId;
use crate::artifacts::log::log_item::LogItem;
use crate::artifacts::log::{FIELD_LINE_REGEX, HG_DATE_FORMAT, LOG_FIELDS, LogField};
use crate::errors::TrackerError;
use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use regex::Regex;

/// Parser for the default `hg log` template
///
/// Produces the entries in input order (newest first). Entries that do not list
/// any `parent:` are chained to the entry printed right after them, which is how
/// `hg log` omits the obvious `rev - 1` parent.
#[derive(Debug, Clone)]
pub struct LogParser {
    field_line: Regex,
}

impl LogParser {
    pub fn new() -> anyhow::Result<Self> {
        let field_line = Regex::new(FIELD_LINE_REGEX)
            .with_context(|| format!("invalid log field regex: {FIELD_LINE_REGEX}"))?;

        Ok(LogParser { field_line })
    }

    pub fn parse(&self, log: &str) -> anyhow::Result<Vec<LogItem>> {
        let mut items: Vec<LogItem> = Vec::new();
        let mut block = Vec::new();

        for line in log.lines() {
            if line.trim().is_empty() {
                if !block.is_empty() {
                    self.push_entry(&mut items, &block)?;
                    block.clear();
                }
                continue;
            }
            block.push(line);
        }
        if !block.is_empty() {
            self.push_entry(&mut items, &block)?;
        }

        Ok(items)
    }

    fn push_entry(&self, items: &mut Vec<LogItem>, block: &[&str]) -> anyhow::Result<()> {
        let item = self.parse_entry(block)?;

        if let Some(previous) = items.last_mut()
            && previous.parents().is_empty()
            && !previous.changeset().is_root()
        {
            previous.parents_mut().push(item.changeset().clone());
        }
        items.push(item);

        Ok(())
    }

    fn parse_entry(&self, block: &[&str]) -> anyhow::Result<LogItem> {
        let mut changeset = None;
        let mut parents = Vec::with_capacity(2);
        let mut tag = None;
        let mut user = None;
        let mut date = None;
        let mut summary = None;
        let mut branch = None;

        for line in block {
            let (field, value) = self.parse_field_line(line)?;
            match field {
                LogField::Changeset => changeset = Some(ChangesetId::try_parse(value)?),
                LogField::Parent => parents.push(ChangesetId::try_parse(value)?),
                // hg prints one line per tag; the last one wins
                LogField::Tag => tag = Some(value.to_string()),
                LogField::User => user = Some(value.to_string()),
                LogField::Date => date = Some(parse_hg_date(value)?),
                LogField::Summary => summary = Some(value.to_string()),
                LogField::Branch => branch = Some(value.to_string()),
            }
        }

        let changeset =
            changeset.ok_or_else(|| TrackerError::MissingChangeset(block.join(" | ")))?;
        if parents.len() > 2 {
            return Err(TrackerError::TooManyParents {
                changeset: changeset.to_string(),
                count: parents.len(),
            }
            .into());
        }
        let date = date.with_context(|| format!("changeset {changeset} has no date"))?;

        let mut item = LogItem::new(changeset, date)
            .with_parents(parents)
            .with_user(user.unwrap_or_default())
            .with_summary(summary.unwrap_or_default());
        if let Some(tag) = tag {
            item = item.with_tag(tag);
        }
        if let Some(branch) = branch {
            item = item.with_branch(branch);
        }

        Ok(item)
    }

    fn parse_field_line<'l>(&self, line: &'l str) -> anyhow::Result<(LogField, &'l str)> {
        let captures = self
            .field_line
            .captures(line)
            .ok_or_else(|| TrackerError::MalformedLine(line.to_string()))?;
        let label = captures.get(1).map_or("", |m| m.as_str());
        let value = captures.get(2).map_or("", |m| m.as_str());

        let field = LOG_FIELDS
            .get(label)
            .copied()
            .ok_or_else(|| TrackerError::UnknownField {
                label: label.to_string(),
                line: line.to_string(),
            })?;

        Ok((field, value))
    }
}

pub fn parse_hg_date(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_str(value, HG_DATE_FORMAT).map_err(|source| {
        TrackerError::InvalidDate {
            value: value.to_string(),
            source,
        }
        .into()
    })
}
