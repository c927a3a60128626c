use crate::areas::forest::Forest;
use crate::artifacts::join::commits_joiner::Checkpoint;
use anyhow::Context;
use regex::Regex;

/// Runs of anything but ASCII letters and digits, replaced by a single dot
const TAG_SEPARATOR_REGEX: &str = r"[^0-9a-zA-Z]+";

const CHANGESETS_EXTENSION: &str = "changesets";

/// Names of checkpoints, as printed and as `.changesets` files
#[derive(Debug, Clone)]
pub struct CheckpointNames {
    separator: Regex,
}

impl CheckpointNames {
    pub fn new() -> anyhow::Result<Self> {
        let separator = Regex::new(TAG_SEPARATOR_REGEX)
            .with_context(|| format!("invalid tag separator regex: {TAG_SEPARATOR_REGEX}"))?;

        Ok(CheckpointNames { separator })
    }

    /// `jdk8u172-b11` becomes `jdk8u172.b11`
    pub fn sanitize(&self, tag: &str) -> String {
        self.separator.replace_all(tag, ".").into_owned()
    }

    pub fn tag_and_changesets(&self, tag: &str, changesets: usize) -> String {
        format!("{}-{}", self.sanitize(tag), changesets)
    }

    pub fn file_name(&self, tag: &str, changesets: usize) -> String {
        format!(
            "{}.{}",
            self.tag_and_changesets(tag, changesets),
            CHANGESETS_EXTENSION
        )
    }
}

impl Forest {
    /// Print every checkpoint, or write each one to its own file
    ///
    /// Printed checkpoints are a `<tag>-<changesets>` line followed by one
    /// indented checkout line per repository. With an output directory the
    /// absolute path of every written file is printed instead; a file that
    /// cannot be written is reported and skipped.
    pub fn report(&self, checkpoints: &[Checkpoint]) -> anyhow::Result<()> {
        let names = CheckpointNames::new()?;

        for checkpoint in checkpoints {
            match &self.config().output_dir {
                None => {
                    self.emit_result(
                        &names.tag_and_changesets(&checkpoint.tag, checkpoint.changesets),
                    )?;
                    for result in &checkpoint.results {
                        self.emit_result(&format!("  {}", result.checkout_line()))?;
                    }
                }
                Some(dir) => {
                    let file = std::path::absolute(
                        dir.join(names.file_name(&checkpoint.tag, checkpoint.changesets)),
                    )?;
                    self.emit_result(&file.display().to_string())?;

                    let content = checkpoint
                        .results
                        .iter()
                        .map(|result| format!("{}\n", result.checkout_line()))
                        .collect::<String>();
                    if let Err(err) = std::fs::write(&file, content) {
                        tracing::error!("cannot write {}: {}", file.display(), err);
                    }
                }
            }
        }

        Ok(())
    }
}
