//! Run configuration
//!
//! Everything the command line decides is collected once into a
//! [`TrackerConfig`] and handed to the components that need it. Nothing is
//! global, so several configurations can be used side by side (tests do).

use crate::artifacts::search::DEFAULT_TARGETED_DEPTH;
use crate::errors::TrackerError;
use bitflags::bitflags;
use std::ffi::OsString;
use std::path::PathBuf;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TrackerFlags: u8 {
        /// Drop paths truncated by the buffer limit
        const REMOVE_INCOMPLETE_PATHS = 0b0001;
        /// Walk the default branch only
        const IGNORE_NON_DEFAULT_BRANCHES = 0b0010;
        /// Do not look for sub-repositories
        const ENFORCE_SINGLE_REPO = 0b0100;
        /// Only report the best tag for the tip of the forest
        const TIP_TAGS_ONLY = 0b1000;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Maximal length of a searched path, unbounded when `None`
    pub buffer_limit: Option<usize>,
    pub flags: TrackerFlags,
    /// Write one file per checkpoint here instead of printing them
    pub output_dir: Option<PathBuf>,
}

impl TrackerConfig {
    /// Checks that the output directory, if any, exists
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(dir) = &self.output_dir
            && !dir.is_dir()
        {
            return Err(TrackerError::MissingOutputDir(dir.clone()).into());
        }

        Ok(())
    }

    /// Depth of the primary search from the tip to any tag
    pub fn search_depth(&self) -> usize {
        self.buffer_limit.unwrap_or(usize::MAX)
    }

    /// Depth of the search for tags known from sibling repositories
    ///
    /// Such tags may not be reachable at all, so this one is always bounded.
    pub fn targeted_depth(&self) -> usize {
        self.buffer_limit.unwrap_or(DEFAULT_TARGETED_DEPTH)
    }

    pub fn remove_incomplete_paths(&self) -> bool {
        self.flags.contains(TrackerFlags::REMOVE_INCOMPLETE_PATHS)
    }

    pub fn default_branch_only(&self) -> bool {
        self.flags.contains(TrackerFlags::IGNORE_NON_DEFAULT_BRANCHES)
    }

    pub fn single_repo(&self) -> bool {
        self.flags.contains(TrackerFlags::ENFORCE_SINGLE_REPO)
    }

    pub fn tip_tags_only(&self) -> bool {
        self.flags.contains(TrackerFlags::TIP_TAGS_ONLY)
    }
}

/// Switch names also accepted with a single dash, as in `-bufferLimit=30`
pub const LEGACY_SWITCHES: phf::Set<&'static str> = phf::phf_set! {
    "bufferLimit",
    "removeUncompletePaths",
    "ignoreNonDefaultBranches",
    "verbose",
    "outputDir",
    "tipTagsOnly",
    "enforceSingleRepo",
    "log",
    "hg",
};

/// Rewrite `-bufferLimit=30` style switches to `--bufferLimit=30`
///
/// Anything else, including the program name and GNU style options, is passed
/// through untouched.
pub fn normalize_switches<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(switch) = text.strip_prefix('-') else {
                return arg;
            };
            let name = switch.split_once('=').map_or(switch, |(name, _)| name);

            if !switch.starts_with('-') && LEGACY_SWITCHES.contains(name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}
