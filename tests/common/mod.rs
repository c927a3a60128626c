#![allow(dead_code)]

use chrono::{DateTime, Duration, FixedOffset, Local, TimeZone};
use fake::Fake;
use fake::faker::lorem::en::Words;
use fake::faker::name::en::Name;
use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

const HG_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

pub fn hash(rev: i32) -> String {
    format!("{:012x}", 0xc0ffee_0000_i64 + i64::from(rev))
}

/// `rev:hash` as printed in checkout lines
pub fn changeset(rev: i32) -> String {
    format!("{}:{}", rev, hash(rev))
}

/// 2018-03-01 00:00:00 +01:00 plus one hour per revision
pub fn fixed_date(rev: i32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2018, 3, 1, 0, 0, 0)
        .unwrap()
        + Duration::hours(i64::from(rev))
}

/// One day ago, minus one hour per revision older than `top`
pub fn recent_date(rev: i32, top: i32) -> DateTime<FixedOffset> {
    (Local::now() - Duration::days(1) - Duration::hours(i64::from(top - rev))).fixed_offset()
}

/// One `hg log` block
#[derive(Debug, Clone)]
pub struct Commit {
    rev: i32,
    tags: Vec<String>,
    parents: Vec<i32>,
    branch: Option<String>,
    summary: String,
    date: DateTime<FixedOffset>,
}

impl Commit {
    pub fn new(rev: i32) -> Self {
        Commit {
            rev,
            tags: Vec::new(),
            parents: Vec::new(),
            branch: None,
            summary: Words(3..6).fake::<Vec<String>>().join(" "),
            date: fixed_date(rev),
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn parents(mut self, parents: &[i32]) -> Self {
        self.parents = parents.to_vec();
        self
    }

    pub fn merge(self, first: i32, second: i32) -> Self {
        self.parents(&[first, second]).summary("Merge")
    }

    pub fn branch(mut self, branch: &str) -> Self {
        self.branch = Some(branch.to_string());
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = summary.to_string();
        self
    }

    pub fn date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date = date;
        self
    }

    fn render(&self) -> String {
        let mut block = format!("changeset:   {}\n", changeset(self.rev));
        if let Some(branch) = &self.branch {
            block.push_str(&format!("branch:      {}\n", branch));
        }
        for tag in &self.tags {
            block.push_str(&format!("tag:         {}\n", tag));
        }
        for parent in &self.parents {
            block.push_str(&format!("parent:      {}\n", changeset(*parent)));
        }
        block.push_str(&format!("user:        {}\n", Name().fake::<String>()));
        block.push_str(&format!("date:        {}\n", self.date.format(HG_DATE_FORMAT)));
        block.push_str(&format!("summary:     {}\n", self.summary));
        block
    }
}

/// `hg log` output for commits listed newest first
pub fn hg_log(commits: &[Commit]) -> String {
    commits
        .iter()
        .map(Commit::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A linear history `top..=0` with `tip` on top and the given tags
pub fn linear(top: i32, tags: &[(i32, &str)]) -> Vec<Commit> {
    (0..=top)
        .rev()
        .map(|rev| {
            let mut commit = Commit::new(rev);
            if rev == top {
                commit = commit.tag("tip");
            }
            if let Some((_, tag)) = tags.iter().find(|(tagged, _)| *tagged == rev) {
                commit = commit.tag(tag);
            }
            commit
        })
        .collect()
}

/// Same as [`linear`] with dates of the last day
pub fn recent_linear(top: i32, tags: &[(i32, &str)]) -> Vec<Commit> {
    linear(top, tags)
        .into_iter()
        .map(|commit| {
            let date = recent_date(commit.rev, top);
            commit.date(date)
        })
        .collect()
}

/// Create a repository directory with a `.hg` marker and its recorded log
pub fn write_repository(dir: &Path, log: &str) -> PathBuf {
    let marker = dir.join(".hg");
    std::fs::create_dir_all(&marker).expect("Failed to create .hg");
    std::fs::write(marker.join("log.txt"), log).expect("Failed to write log");
    dir.to_path_buf()
}

/// Make the fake `hg` of a repository exit with `code`
pub fn fail_repository(dir: &Path, code: i32) {
    std::fs::write(dir.join(".hg").join("exit-code"), code.to_string())
        .expect("Failed to write exit code");
}

/// A stand-in for `hg` printing the log recorded by [`write_repository`]
#[cfg(unix)]
pub fn fake_hg(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-hg");
    std::fs::write(
        &script,
        "#!/bin/sh\n\
         [ \"$1\" = \"log\" ] || exit 2\n\
         cat .hg/log.txt\n\
         if [ -f .hg/exit-code ]; then exit \"$(cat .hg/exit-code)\"; fi\n",
    )
    .expect("Failed to write fake hg");
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake hg executable");
    script
}

/// In-memory writer that can be read after the forest consumed it
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
