//! Integration tests for duwalk
//!
//! These build real directory trees under a tempdir and walk them with the
//! library API, capturing report lines in a byte buffer. Block allocations
//! vary by filesystem, so assertions check relative relationships (children
//! plus self equals parent) rather than hard-coded counts.

use clap::Parser;
use duwalk::config::{trim_trailing_separators, CliArgs, DuConfig};
use duwalk::error::ConfigError;
use duwalk::walker::{WalkStats, Walker};
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use tempfile::tempdir;

/// Walk `path` and return (grand total, stats, report lines).
fn walk(path: &Path, all_files: bool) -> (u64, WalkStats, Vec<String>) {
    let mut buf = Vec::new();
    let mut walker = Walker::new(all_files, &mut buf);
    let total = walker
        .run(path, &path.display().to_string())
        .expect("walk failed");
    let stats = walker.stats();
    let lines = String::from_utf8(buf)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    (total, stats, lines)
}

/// Allocated size of one path in 1024-byte units, as the walker counts it.
fn halved_blocks(path: &Path) -> u64 {
    fs::symlink_metadata(path).unwrap().blocks() / 2
}

fn parse_args(path: &str) -> CliArgs {
    CliArgs::try_parse_from(["duwalk", path]).unwrap()
}

fn reported_size(lines: &[String], path: &Path) -> Option<u64> {
    let wanted = path.to_str().unwrap();
    lines.iter().find_map(|line| {
        let (size, line_path) = line.split_once('\t')?;
        (line_path == wanted).then(|| size.parse().unwrap())
    })
}

#[test]
fn test_hard_links_across_sibling_directories_count_once() {
    let root = tempdir().unwrap();
    let left = root.path().join("left");
    let right = root.path().join("right");
    fs::create_dir(&left).unwrap();
    fs::create_dir(&right).unwrap();

    let original = left.join("data");
    fs::write(&original, vec![0u8; 8192]).unwrap();
    fs::hard_link(&original, right.join("alias")).unwrap();

    let (total, stats, _) = walk(root.path(), false);

    // One copy of the file data, three directory self entries.
    let expected = halved_blocks(root.path())
        + halved_blocks(&left)
        + halved_blocks(&right)
        + halved_blocks(&original);
    assert_eq!(total, expected);
    assert_eq!(stats.deduped, 1);
    assert_eq!(stats.files, 2);
}

#[test]
fn test_parent_total_is_children_plus_self() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("a"), vec![1u8; 4096]).unwrap();
    let sub = root.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("b"), vec![2u8; 12288]).unwrap();
    let deeper = sub.join("deeper");
    fs::create_dir(&deeper).unwrap();
    fs::write(deeper.join("c"), vec![3u8; 2048]).unwrap();

    let (total, _, lines) = walk(root.path(), true);

    let a = reported_size(&lines, &root.path().join("a")).unwrap();
    let b = reported_size(&lines, &sub.join("b")).unwrap();
    let c = reported_size(&lines, &deeper.join("c")).unwrap();
    let deeper_total = reported_size(&lines, &deeper).unwrap();
    let sub_total = reported_size(&lines, &sub).unwrap();

    assert_eq!(deeper_total, halved_blocks(&deeper) + c);
    assert_eq!(sub_total, halved_blocks(&sub) + b + deeper_total);
    assert_eq!(total, halved_blocks(root.path()) + a + sub_total);
}

#[test]
fn test_symlinked_subtree_contributes_nothing() {
    let root = tempdir().unwrap();
    let target = root.path().join("target");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("payload"), vec![0u8; 65536]).unwrap();

    let scanned = root.path().join("scanned");
    fs::create_dir(&scanned).unwrap();
    std::os::unix::fs::symlink(&target, scanned.join("way-out")).unwrap();

    let (total, stats, lines) = walk(&scanned, true);

    assert_eq!(total, halved_blocks(&scanned));
    assert_eq!(stats.files, 0);
    assert!(lines.iter().all(|l| !l.contains("way-out")));
    assert!(lines.iter().all(|l| !l.contains("payload")));
}

#[test]
fn test_empty_directory_reports_own_allocation() {
    let root = tempdir().unwrap();
    let empty = root.path().join("empty");
    fs::create_dir(&empty).unwrap();

    let (_, _, lines) = walk(root.path(), false);
    let reported = reported_size(&lines, &empty).unwrap();
    assert_eq!(reported, halved_blocks(&empty));
}

#[test]
fn test_directories_always_reported_files_gated_by_all() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("file"), b"f").unwrap();
    fs::create_dir(root.path().join("dir")).unwrap();

    let (_, _, without_all) = walk(root.path(), false);
    let (_, _, with_all) = walk(root.path(), true);

    assert!(reported_size(&without_all, &root.path().join("dir")).is_some());
    assert!(reported_size(&without_all, &root.path().join("file")).is_none());
    assert!(reported_size(&with_all, &root.path().join("dir")).is_some());
    assert!(reported_size(&with_all, &root.path().join("file")).is_some());
}

#[test]
fn test_grand_total_line_is_last_and_well_formed() {
    let root = tempdir().unwrap();
    fs::create_dir(root.path().join("sub")).unwrap();
    fs::write(root.path().join("sub").join("f"), b"data").unwrap();

    let (total, _, lines) = walk(root.path(), true);

    let last = lines.last().unwrap();
    let (size, path) = last.split_once('\t').unwrap();
    assert_eq!(size.parse::<u64>().unwrap(), total);
    assert_eq!(path, root.path().to_str().unwrap());

    for line in &lines {
        let (size, _) = line.split_once('\t').expect("every line is size<TAB>path");
        size.parse::<u64>().expect("size column is an integer");
    }
}

#[test]
fn test_grand_total_identical_with_and_without_all() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("a"), vec![0u8; 4096]).unwrap();
    let sub = root.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("b"), vec![0u8; 8192]).unwrap();
    fs::hard_link(sub.join("b"), root.path().join("b-alias")).unwrap();

    let (quiet_total, _, _) = walk(root.path(), false);
    let (all_total, _, _) = walk(root.path(), true);
    assert_eq!(quiet_total, all_total);
}

#[test]
fn test_trailing_separator_only_changes_displayed_path() {
    let root = tempdir().unwrap();
    fs::write(root.path().join("f"), b"data").unwrap();

    let plain = root.path().display().to_string();
    let slashed = format!("{plain}///");

    let plain_args = parse_args(&plain);
    let slashed_args = parse_args(&slashed);

    let plain_cfg = DuConfig::from_args(plain_args).unwrap();
    let slashed_cfg = DuConfig::from_args(slashed_args).unwrap();

    assert_eq!(plain_cfg.root, slashed_cfg.root);
    assert_eq!(slashed_cfg.display_path, format!("{plain}/"));

    let mut plain_buf = Vec::new();
    let mut walker = Walker::new(false, &mut plain_buf);
    let plain_total = walker.run(&plain_cfg.root, &plain_cfg.display_path).unwrap();

    let mut slashed_buf = Vec::new();
    let mut walker = Walker::new(false, &mut slashed_buf);
    let slashed_total = walker
        .run(&slashed_cfg.root, &slashed_cfg.display_path)
        .unwrap();

    assert_eq!(plain_total, slashed_total);
    let plain_out = String::from_utf8(plain_buf).unwrap();
    let slashed_out = String::from_utf8(slashed_buf).unwrap();
    assert_eq!(plain_out.trim_end(), format!("{plain_total}\t{plain}"));
    assert_eq!(slashed_out.trim_end(), format!("{slashed_total}\t{plain}/"));
}

#[test]
fn test_nonexistent_path_fails_before_traversal() {
    let root = tempdir().unwrap();
    let missing = root.path().join("no").join("such").join("path");

    let args = parse_args(missing.to_str().unwrap());
    let err = DuConfig::from_args(args).unwrap_err();
    assert!(matches!(err, ConfigError::PathNotFound { .. }));
}

#[test]
fn test_trim_helper_matches_config_behavior() {
    assert_eq!(trim_trailing_separators("/data/"), ("/data", true));
    assert_eq!(trim_trailing_separators("/data"), ("/data", false));
    assert_eq!(trim_trailing_separators("/"), ("/", false));
}
