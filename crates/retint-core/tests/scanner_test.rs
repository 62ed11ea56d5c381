//! Scanner integration tests.

use std::fs;
use std::path::Path;

use retint_core::errors::ScanError;
use retint_core::scanner::{ScanOptions, Scanner};

fn touch(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn relatives(options: ScanOptions) -> Vec<String> {
    Scanner::new(options)
        .unwrap()
        .collect()
        .files
        .into_iter()
        .map(|f| f.relative)
        .collect()
}

#[test]
fn test_default_extensions_and_ignores() {
    let dir = tempfile::tempdir().unwrap();
    for file in [
        "src/App.tsx",
        "src/index.js",
        "src/theme.css",
        "src/theme.scss",
        "src/readme.md",
        "src/App.tsx.backup",
        "src/App.tsx.bak",
        "node_modules/pkg/index.js",
        ".next/server/page.js",
        "coverage/lcov.js",
        "build/app.js",
    ] {
        touch(dir.path(), file, "x");
    }

    let files = relatives(ScanOptions::new(dir.path()));
    assert_eq!(
        files,
        vec!["src/App.tsx", "src/index.js", "src/theme.css", "src/theme.scss"]
    );
}

#[test]
fn test_gitignore_and_retintignore_are_honored() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "src/keep.ts", "x");
    touch(dir.path(), "src/generated/api.ts", "x");
    touch(dir.path(), "vendor/lib.ts", "x");
    touch(dir.path(), ".gitignore", "src/generated/\n");
    touch(dir.path(), ".retintignore", "vendor/\n");

    assert_eq!(relatives(ScanOptions::new(dir.path())), vec!["src/keep.ts"]);
}

#[test]
fn test_extra_ignores_and_custom_extensions() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "a.vue", "x");
    touch(dir.path(), "b.VUE", "x");
    touch(dir.path(), "c.tsx", "x");
    touch(dir.path(), "skip/d.vue", "x");

    let options = ScanOptions::new(dir.path())
        .with_extensions([".vue"])
        .with_ignore("skip/");
    assert_eq!(relatives(options), vec!["a.vue", "b.VUE"]);
}

#[test]
fn test_oversized_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "small.ts", "x");
    touch(dir.path(), "large.ts", &"x".repeat(2048));

    let mut options = ScanOptions::new(dir.path());
    options.max_file_size = 1024;
    let result = Scanner::new(options).unwrap().collect();

    assert_eq!(result.stats.files_found, 1);
    assert_eq!(result.stats.files_skipped, 1);
    assert_eq!(result.files[0].relative, "small.ts");
    assert_eq!(result.stats.total_bytes, 1);
}

#[test]
fn test_invalid_root() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("file.ts");
    fs::write(&file, "x").unwrap();

    for root in [dir.path().join("missing"), file] {
        match Scanner::new(ScanOptions::new(&root)) {
            Err(ScanError::InvalidRoot { path }) => assert_eq!(path, root),
            other => panic!("expected InvalidRoot, got {:?}", other.err()),
        }
    }
}

#[test]
fn test_stylesheet_detection() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "a.css", "x");
    touch(dir.path(), "b.tsx", "x");

    let result = Scanner::new(ScanOptions::new(dir.path())).unwrap().collect();
    let kinds: Vec<(String, bool)> = result
        .files
        .iter()
        .map(|f| (f.relative.clone(), f.is_stylesheet()))
        .collect();
    assert_eq!(
        kinds,
        vec![("a.css".to_string(), true), ("b.tsx".to_string(), false)]
    );
}
