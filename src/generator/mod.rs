//! File generation from scanned blocks.
//!
//! Blocks are written strictly in document order. For each block the
//! generator filters skip patterns, sanitizes the path so it stays inside the
//! output root, applies the overwrite policy, creates parent directories and
//! writes the (optionally pre-processed) content. A failure to create a
//! directory, write a file or run the post-process hook aborts the run;
//! files written by earlier blocks are left in place.
//!
//! # Example
//!
//! ```ignore
//! use mdgen::generator::{generate_files, GeneratorOptions};
//!
//! let report = generate_files(&blocks, "out", &GeneratorOptions::default())?;
//! println!("wrote {} files", report.written_count());
//! ```

mod hooks;
mod options;
mod report;

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{MdgenError, Result};
use crate::types::{safe_relative_path, Block};

pub use hooks::{CommandHook, GenerateHooks, NoopHooks};
pub use options::{GeneratorOptions, SkipPatterns, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE};
pub use report::{BlockOutcome, GenerateReport, SkipReason, SkippedBlock};

/// Write blocks under `root`, returning what was written and skipped.
pub fn generate_files(
    blocks: &[Block],
    root: impl AsRef<Path>,
    options: &GeneratorOptions,
) -> Result<GenerateReport> {
    let root = root.as_ref();
    let mut report = GenerateReport::new();
    // targets a dry run would have created so far
    let mut planned: HashSet<PathBuf> = HashSet::new();

    for block in blocks {
        if let Some(pattern) = options.skip_patterns.matching(&block.path) {
            debug!(path = %block.path, pattern, "skipping block matching pattern");
            report.skip(&block.path, SkipReason::Pattern(pattern.to_string()));
            continue;
        }

        let Some(relative) = safe_relative_path(&block.path) else {
            info!(path = %block.path, "skipping block with unsafe path");
            report.skip(&block.path, SkipReason::UnsafePath);
            continue;
        };

        if crosses_symlink(root, &relative) {
            info!(path = %block.path, "skipping block routed through a symlink");
            report.skip(&block.path, SkipReason::UnsafePath);
            continue;
        }

        let target = root.join(&relative);

        if !options.overwrite
            && (planned.contains(&target) || fs::symlink_metadata(&target).is_ok())
        {
            debug!(path = %target.display(), "skipping existing file");
            report.skip(&block.path, SkipReason::Exists);
            continue;
        }

        if options.dry_run {
            planned.insert(target.clone());
            report.write(target);
            continue;
        }

        if let Some(dir) = target.parent() {
            create_dir_all(dir, options.dir_mode)?;
        }

        let content = options.hooks.pre_process(&block.content, &block.language);
        write_file(&target, content.as_bytes(), options.file_mode)?;
        debug!(path = %target.display(), bytes = content.len(), "wrote file");

        options.hooks.post_process(&target)?;

        report.write(target);
    }

    Ok(report)
}

/// Whether any existing entry between `root` and the target is a symlink.
///
/// Writing through a symlinked directory or file could land outside the
/// output root even though the relative path itself is clean.
fn crosses_symlink(root: &Path, relative: &str) -> bool {
    let mut current = root.to_path_buf();
    for segment in relative.split('/') {
        current.push(segment);
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => return true,
            Ok(_) => {}
            Err(_) => return false,
        }
    }
    false
}

fn create_dir_all(dir: &Path, mode: u32) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(dir).map_err(|e| MdgenError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to create directory: {}", e),
    })
}

fn write_file(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    let mut open = fs::OpenOptions::new();
    open.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        open.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let to_io_error = |e: std::io::Error| MdgenError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    };

    let mut file = open.open(path).map_err(to_io_error)?;
    file.write_all(content).map_err(to_io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::parser::{parse_str, ParserOptions};

    fn first_skip(report: &GenerateReport) -> SkipReason {
        report.skipped().next().unwrap().reason.clone()
    }

    #[test]
    fn test_generate_example_document() {
        let dir = tempdir().unwrap();
        let blocks = parse_str(
            "## src/main.go\n```go\nfmt.Println(\"hi\")\n```\n",
            &ParserOptions::default(),
        )
        .unwrap();

        let report = generate_files(&blocks, dir.path(), &GeneratorOptions::default()).unwrap();

        let written = dir.path().join("src/main.go");
        assert_eq!(report.written().collect::<Vec<_>>(), vec![written.as_path()]);
        assert_eq!(fs::read_to_string(written).unwrap(), "fmt.Println(\"hi\")\n");
    }

    #[test]
    fn test_round_trip_content() {
        let dir = tempdir().unwrap();
        let blocks = vec![
            Block::new("a.txt", "alpha", ""),
            Block::new("nested/deep/b.rs", "fn main() {\n    run();\n}", "rust"),
            Block::new("c/./d.md", "# Title", "markdown"),
        ];

        generate_files(&blocks, dir.path(), &GeneratorOptions::default()).unwrap();

        for block in &blocks {
            let relative = safe_relative_path(&block.path).unwrap();
            let written = fs::read_to_string(dir.path().join(relative)).unwrap();
            assert_eq!(written, block.content);
        }
    }

    #[test]
    fn test_first_write_wins_without_overwrite() {
        let dir = tempdir().unwrap();
        let blocks = vec![
            Block::new("same.txt", "first", ""),
            Block::new("same.txt", "second", ""),
        ];

        let report = generate_files(&blocks, dir.path(), &GeneratorOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("same.txt")).unwrap(), "first\n");
        assert_eq!(report.written_count(), 1);
        assert_eq!(first_skip(&report), SkipReason::Exists);
    }

    #[test]
    fn test_last_write_wins_with_overwrite() {
        let dir = tempdir().unwrap();
        let blocks = vec![
            Block::new("same.txt", "first", ""),
            Block::new("same.txt", "second", ""),
        ];
        let options = GeneratorOptions {
            overwrite: true,
            ..Default::default()
        };

        generate_files(&blocks, dir.path(), &options).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("same.txt")).unwrap(), "second\n");
    }

    #[test]
    fn test_existing_file_preserved() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("keep.txt"), "original").unwrap();

        generate_files(
            &[Block::new("keep.txt", "replacement", "")],
            dir.path(),
            &GeneratorOptions::default(),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("keep.txt")).unwrap(), "original");
    }

    #[test]
    fn test_traversal_never_written() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("out");
        let blocks = vec![
            Block::new("../../etc/passwd", "root:x:0:0", ""),
            Block::new("../escape.txt", "nope", ""),
            Block::new("a/../../escape2.txt", "nope", ""),
        ];

        for overwrite in [false, true] {
            let options = GeneratorOptions {
                overwrite,
                ..Default::default()
            };
            let report = generate_files(&blocks, &root, &options).unwrap();

            assert_eq!(report.written_count(), 0);
            assert!(report.skipped().all(|s| s.reason == SkipReason::UnsafePath));
        }
        assert!(!dir.path().join("escape.txt").exists());
        assert!(!dir.path().join("escape2.txt").exists());
    }

    #[test]
    fn test_absolute_path_rerooted() {
        let dir = tempdir().unwrap();

        generate_files(
            &[Block::new("/abs/file.txt", "x", "")],
            dir.path(),
            &GeneratorOptions::default(),
        )
        .unwrap();

        assert!(dir.path().join("abs/file.txt").exists());
    }

    #[test]
    fn test_skip_patterns_regardless_of_overwrite() {
        let dir = tempdir().unwrap();
        let blocks = vec![
            Block::new("notes/draft.tmp", "scratch", ""),
            Block::new("notes/final.md", "done", ""),
        ];

        for overwrite in [false, true] {
            let options = GeneratorOptions {
                overwrite,
                skip_patterns: SkipPatterns::new(&["*.tmp"]).unwrap(),
                ..Default::default()
            };
            let report = generate_files(&blocks, dir.path(), &options).unwrap();
            assert_eq!(first_skip(&report), SkipReason::Pattern("*.tmp".to_string()));
        }

        assert!(!dir.path().join("notes/draft.tmp").exists());
        assert!(dir.path().join("notes/final.md").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let options = GeneratorOptions {
            dry_run: true,
            ..Default::default()
        };

        let report = generate_files(&[Block::new("a/b.txt", "x", "")], dir.path(), &options).unwrap();

        assert_eq!(
            report.written().collect::<Vec<_>>(),
            vec![dir.path().join("a/b.txt").as_path()]
        );
        assert!(!dir.path().join("a").exists());
    }

    #[test]
    fn test_dry_run_matches_real_run_for_duplicates() {
        let dir = tempdir().unwrap();
        let blocks = vec![
            Block::new("same.txt", "first", ""),
            Block::new("other.txt", "x", ""),
            Block::new("same.txt", "second", ""),
        ];
        let dry_run = GeneratorOptions {
            dry_run: true,
            ..Default::default()
        };

        let planned = generate_files(&blocks, dir.path(), &dry_run).unwrap();
        let real = generate_files(&blocks, dir.path().join("real"), &GeneratorOptions::default())
            .unwrap();

        assert_eq!(planned.written_count(), 2);
        assert_eq!(planned.skipped_count(), 1);
        assert_eq!(first_skip(&planned), SkipReason::Exists);
        assert_eq!(real.written_count(), planned.written_count());
        assert_eq!(real.skipped_count(), planned.skipped_count());
    }

    #[test]
    fn test_dry_run_with_overwrite_plans_every_duplicate() {
        let dir = tempdir().unwrap();
        let options = GeneratorOptions {
            dry_run: true,
            overwrite: true,
            ..Default::default()
        };

        let report = generate_files(
            &[Block::new("same.txt", "a", ""), Block::new("same.txt", "b", "")],
            dir.path(),
            &options,
        )
        .unwrap();

        assert_eq!(report.written_count(), 2);
        assert!(!dir.path().join("same.txt").exists());
    }

    #[test]
    fn test_outcomes_in_block_order() {
        let dir = tempdir().unwrap();
        let options = GeneratorOptions {
            skip_patterns: SkipPatterns::new(&["*.tmp"]).unwrap(),
            ..Default::default()
        };

        let report = generate_files(
            &[
                Block::new("a.txt", "a", ""),
                Block::new("b.tmp", "b", ""),
                Block::new("c.txt", "c", ""),
            ],
            dir.path(),
            &options,
        )
        .unwrap();

        assert_eq!(
            report.outcomes,
            vec![
                BlockOutcome::Written(dir.path().join("a.txt")),
                BlockOutcome::Skipped(SkippedBlock {
                    path: "b.tmp".to_string(),
                    reason: SkipReason::Pattern("*.tmp".to_string()),
                }),
                BlockOutcome::Written(dir.path().join("c.txt")),
            ]
        );
    }

    #[derive(Debug, Default)]
    struct RecordingHooks {
        seen: Rc<RefCell<Vec<PathBuf>>>,
        fail: bool,
    }

    impl GenerateHooks for RecordingHooks {
        fn pre_process<'a>(&self, content: &'a str, language: &str) -> Cow<'a, str> {
            Cow::Owned(format!("// lang: {}\n{}", language, content))
        }

        fn post_process(&self, path: &Path) -> Result<()> {
            self.seen.borrow_mut().push(path.to_path_buf());
            if self.fail {
                return Err(MdgenError::Hook {
                    path: path.to_path_buf(),
                    message: "formatter failed".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_hooks_applied_in_order() {
        let dir = tempdir().unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let options = GeneratorOptions::default().with_hooks(RecordingHooks {
            seen: Rc::clone(&seen),
            fail: false,
        });

        generate_files(
            &[Block::new("a.go", "package a", "go"), Block::new("b.go", "package b", "go")],
            dir.path(),
            &options,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("a.go")).unwrap(),
            "// lang: go\npackage a\n"
        );
        assert_eq!(
            *seen.borrow(),
            vec![dir.path().join("a.go"), dir.path().join("b.go")]
        );
    }

    #[test]
    fn test_post_process_failure_aborts() {
        let dir = tempdir().unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let options = GeneratorOptions::default().with_hooks(RecordingHooks {
            seen: Rc::clone(&seen),
            fail: true,
        });

        let result = generate_files(
            &[Block::new("a.txt", "a", ""), Block::new("b.txt", "b", "")],
            dir.path(),
            &options,
        );

        assert!(matches!(result, Err(MdgenError::Hook { .. })));
        // first file is left in place, second never written
        assert!(dir.path().join("a.txt").exists());
        assert!(!dir.path().join("b.txt").exists());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_write_failure_reports_path() {
        let dir = tempdir().unwrap();
        // a regular file where a directory is needed
        fs::write(dir.path().join("blocker"), "file").unwrap();

        let result = generate_files(
            &[Block::new("blocker/child.txt", "x", "")],
            dir.path(),
            &GeneratorOptions::default(),
        );

        match result {
            Err(MdgenError::Io { path, .. }) => assert_eq!(path, dir.path().join("blocker")),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_not_followed() {
        let dir = tempdir().unwrap();
        let outside = tempdir().unwrap();
        let root = dir.path().join("out");
        fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("link")).unwrap();

        let report = generate_files(
            &[Block::new("link/planted.txt", "x", "")],
            &root,
            &GeneratorOptions::default(),
        )
        .unwrap();

        assert_eq!(first_skip(&report), SkipReason::UnsafePath);
        assert!(!outside.path().join("planted.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let options = GeneratorOptions {
            file_mode: 0o600,
            ..Default::default()
        };

        generate_files(&[Block::new("secret.txt", "x", "")], dir.path(), &options).unwrap();

        let mode = fs::metadata(dir.path().join("secret.txt"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let options = GeneratorOptions {
            dir_mode: 0o700,
            ..Default::default()
        };

        generate_files(&[Block::new("private/keys/a.txt", "x", "")], dir.path(), &options)
            .unwrap();

        for created in ["private", "private/keys"] {
            let mode = fs::metadata(dir.path().join(created))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o700, "{}", created);
        }
    }
}
