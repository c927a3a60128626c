use crate::areas::log_source::LogSource;
use crate::areas::repository::{HG_MARKER, Repository};
use crate::config::TrackerConfig;
use crate::logging::RESULT_TARGET;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A main repository and the repositories nested directly in it
pub struct Forest {
    root: PathBuf,
    config: TrackerConfig,
    source: Box<dyn LogSource>,
    writer: RefCell<Box<dyn Write>>,
}

impl Forest {
    pub fn new(
        root: &Path,
        config: TrackerConfig,
        source: Box<dyn LogSource>,
        writer: Box<dyn Write>,
    ) -> anyhow::Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("cannot resolve repository path {}", root.display()))?;

        Ok(Forest {
            root,
            config,
            source,
            writer: RefCell::new(writer),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    /// Name every result of the forest must carry as its `repo`
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// The main repository, then its sub-repositories sorted by name
    pub fn repository_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![self.root.clone()];
        if self.config.single_repo() {
            return dirs;
        }

        let subrepos = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_dir() && entry.path().join(HG_MARKER).exists())
            .map(|entry| entry.into_path())
            .collect::<Vec<_>>();
        tracing::debug!("Found {}", subrepos.len());

        dirs.extend(subrepos);
        dirs
    }

    /// Run the log of one repository of the forest
    pub fn open_repository(&self, dir: &Path) -> anyhow::Result<Repository> {
        tracing::debug!("Trying {}", dir.display());
        Repository::open(dir, self.source.as_ref())
    }

    /// Print one line of the final result
    pub fn emit_result(&self, line: &str) -> anyhow::Result<()> {
        writeln!(self.writer(), "{line}")?;
        tracing::info!(target: RESULT_TARGET, "{line}");
        Ok(())
    }
}
