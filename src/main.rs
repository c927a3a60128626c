use anyhow::Result;
use chrono::Local;
use clap::{CommandFactory, Parser};
use hgtrack::areas::forest::Forest;
use hgtrack::areas::log_source::HgCommand;
use hgtrack::config::{TrackerConfig, TrackerFlags, normalize_switches};
use hgtrack::logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hgtrack",
    version = "0.1.0",
    about = "Track Mercurial tags across a forest of repositories",
    long_about = "Scans a Mercurial repository, or a forest made of a main repository and \
    the repositories nested directly in it, and reports for every line of history the tag \
    it started from and the number of changesets since. If a forest is given, its \
    repositories should be synchronised.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(index = 1, help = "The repository or forest to scan")]
    path: Option<PathBuf>,

    #[arg(
        long = "bufferLimit",
        value_name = "N",
        help = "Maximal depth of an investigated path",
        long_help = "Maximal depth of an investigated path, eg --bufferLimit=30. \
        The search is exponential in the number of forks, so stay at 10-30. \
        Without it, busy forests may run for hours."
    )]
    buffer_limit: Option<usize>,

    #[arg(
        long = "removeUncompletePaths",
        help = "Drop paths that do not end at a tag (usually with --bufferLimit)"
    )]
    remove_uncomplete_paths: bool,

    #[arg(
        long = "ignoreNonDefaultBranches",
        help = "Walk the default branch only"
    )]
    ignore_non_default_branches: bool,

    #[arg(long, help = "Print progress to stdout")]
    verbose: bool,

    #[arg(
        long = "outputDir",
        value_name = "DIR",
        help = "Write one .changesets file per checkpoint into DIR and print their paths"
    )]
    output_dir: Option<PathBuf>,

    #[arg(
        long = "tipTagsOnly",
        help = "Only print the most recent tag of the tip"
    )]
    tip_tags_only: bool,

    #[arg(
        long = "enforceSingleRepo",
        help = "Do not look for sub-repositories"
    )]
    enforce_single_repo: bool,

    #[arg(
        long = "log",
        value_name = "PATH",
        help = "Also log to PATH; a directory gets a new hgtrack-<timestamp>.log"
    )]
    log: Option<PathBuf>,

    #[arg(
        long = "hg",
        env = "HGTRACK_HG",
        default_value = "hg",
        help = "The Mercurial executable"
    )]
    hg: String,
}

impl Cli {
    fn config(&self) -> TrackerConfig {
        let mut flags = TrackerFlags::empty();
        flags.set(
            TrackerFlags::REMOVE_INCOMPLETE_PATHS,
            self.remove_uncomplete_paths,
        );
        flags.set(
            TrackerFlags::IGNORE_NON_DEFAULT_BRANCHES,
            self.ignore_non_default_branches,
        );
        flags.set(TrackerFlags::ENFORCE_SINGLE_REPO, self.enforce_single_repo);
        flags.set(TrackerFlags::TIP_TAGS_ONLY, self.tip_tags_only);

        TrackerConfig {
            buffer_limit: self.buffer_limit,
            flags,
            output_dir: self.output_dir.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_switches(std::env::args_os()));

    let Some(path) = cli.path.as_deref() else {
        Cli::command().print_long_help()?;
        return Ok(());
    };

    let config = cli.config();
    config.validate()?;

    let log_file = match &cli.log {
        Some(log) => Some(logging::open_log_file(log, Local::now())?.1),
        None => None,
    };
    logging::init(cli.verbose, log_file)?;

    let forest = Forest::new(
        path,
        config,
        Box::new(HgCommand::new(cli.hg.as_str())),
        Box::new(std::io::stdout()),
    )?;

    forest.track()
}
