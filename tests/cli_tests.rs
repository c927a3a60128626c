#![cfg(unix)]

mod common;

use assert_cmd::Command;
use assert_fs::TempDir;
use common::{Commit, changeset, fake_hg, hg_log, linear, recent_linear, write_repository};
use predicates::prelude::predicate;
use rstest::{fixture, rstest};
use std::path::{Path, PathBuf};

/// The fake `hg` lives outside of the scanned repositories
struct Tools {
    _dir: TempDir,
    hg: PathBuf,
}

#[fixture]
fn tools() -> Tools {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let hg = fake_hg(dir.path());
    Tools { _dir: dir, hg }
}

#[fixture]
fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn hgtrack(hg: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hgtrack").expect("hgtrack binary not built");
    cmd.env("HGTRACK_HG", hg).env_remove("RUST_LOG");
    cmd
}

fn name_of(dir: &Path) -> String {
    dir.canonicalize()
        .unwrap()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

fn write(dir: &Path, commits: &[Commit]) {
    write_repository(dir, &hg_log(commits));
}

#[test]
fn no_arguments_prints_usage_and_succeeds() {
    Command::cargo_bin("hgtrack")
        .unwrap()
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE"))
        .stdout(predicate::str::contains("--bufferLimit"))
        .stdout(predicate::str::contains("--tipTagsOnly"));
}

#[rstest]
fn legacy_switches_scan_a_single_repository(tools: Tools, repository_dir: TempDir) {
    write(repository_dir.path(), &linear(2, &[(1, "v2"), (0, "v1")]));

    hgtrack(&tools.hg)
        .arg("-enforceSingleRepo")
        .arg("-bufferLimit=30")
        .arg(repository_dir.path())
        .assert()
        .success()
        .stdout(format!(
            "v2-1\n  {} {} tip\n",
            name_of(repository_dir.path()),
            changeset(2)
        ));
}

#[rstest]
fn forest_is_joined_row_by_row(tools: Tools, repository_dir: TempDir) {
    let root = repository_dir.path();
    write(root, &linear(2, &[(1, "jdk8u172-b11")]));
    write(&root.join("jdk"), &linear(3, &[(0, "jdk8u172-b11")]));
    write(&root.join("hotspot"), &linear(1, &[(0, "jdk8u172-b11")]));

    hgtrack(&tools.hg)
        .arg(root)
        .assert()
        .success()
        .stdout(format!(
            "jdk8u172.b11-5\n  {} {} tip\n  hotspot {} tip\n  jdk {} tip\n",
            name_of(root),
            changeset(2),
            changeset(1),
            changeset(3)
        ));
}

#[rstest]
fn output_dir_receives_changesets_files(tools: Tools, repository_dir: TempDir) {
    write(repository_dir.path(), &linear(4, &[(1, "jdk-10+46")]));
    let out = TempDir::new().unwrap();
    let file = out.path().join("jdk.10.46-3.changesets");

    hgtrack(&tools.hg)
        .arg(format!("-outputDir={}", out.path().display()))
        .arg(repository_dir.path())
        .assert()
        .success()
        .stdout(format!("{}\n", file.display()));

    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        format!("{} {} tip\n", name_of(repository_dir.path()), changeset(4))
    );
}

#[rstest]
fn missing_output_dir_fails_fast(tools: Tools, repository_dir: TempDir) {
    write(repository_dir.path(), &linear(2, &[(1, "v2")]));

    hgtrack(&tools.hg)
        .arg("--outputDir=/definitely/not/here/hgtrack")
        .arg(repository_dir.path())
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("does not exist"));
}

#[rstest]
fn tip_tags_only_prints_one_tag(tools: Tools, repository_dir: TempDir) {
    let root = repository_dir.path();
    write(root, &recent_linear(3, &[(1, "jdk8u181-b02"), (0, "jdk8u181-b01")]));
    write(&root.join("hotspot"), &recent_linear(2, &[(0, "jdk8u181-b02")]));

    hgtrack(&tools.hg)
        .arg("-tipTagsOnly")
        .arg(root)
        .assert()
        .success()
        .stdout("jdk8u181-b02\n");
}

#[rstest]
fn failing_hg_is_fatal(tools: Tools, repository_dir: TempDir) {
    write(repository_dir.path(), &linear(2, &[(1, "v2")]));
    common::fail_repository(repository_dir.path(), 3);

    hgtrack(&tools.hg)
        .arg(repository_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("log returned nonzero - 3"));
}

#[rstest]
fn hg_switch_overrides_the_environment(tools: Tools, repository_dir: TempDir) {
    write(repository_dir.path(), &linear(2, &[(1, "v2")]));

    hgtrack(Path::new("/definitely/not/here/hg"))
        .arg(format!("--hg={}", tools.hg.display()))
        .arg(repository_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("v2-1\n"));
}

#[rstest]
fn log_directory_gets_a_log_with_the_results(tools: Tools, repository_dir: TempDir) {
    write(repository_dir.path(), &linear(2, &[(1, "v2")]));
    let logs = TempDir::new().unwrap();

    hgtrack(&tools.hg)
        .arg(format!("-log={}", logs.path().display()))
        .arg(repository_dir.path())
        .assert()
        .success();

    let entries = std::fs::read_dir(logs.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect::<Vec<_>>();
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("hgtrack-") && name.ends_with(".log"));
    assert!(std::fs::read_to_string(&entries[0]).unwrap().contains("v2-1"));
}

#[rstest]
fn verbose_prints_progress_before_results(tools: Tools, repository_dir: TempDir) {
    write(repository_dir.path(), &linear(2, &[(1, "v2")]));

    hgtrack(&tools.hg)
        .arg("-verbose")
        .arg(repository_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("tip lines are"))
        .stdout(predicate::str::ends_with(format!(
            "v2-1\n  {} {} tip\n",
            name_of(repository_dir.path()),
            changeset(2)
        )));
}
