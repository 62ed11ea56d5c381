//! Variable analysis over a temporary tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use retint_core::analysis::VariableAnalyzer;
use retint_core::config::AnalysisConfig;
use retint_core::report::{render_analysis, ReportFormat};
use retint_core::rules::MappingTarget;
use retint_core::scanner::{ScanOptions, Scanner};

fn touch(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    touch(
        dir.path(),
        "styles/theme.css",
        ":root {\n  --theme-bg-primary: #fff;\n  --bg-cream: #fdf6e3;\n  --legacy-unused: 1px;\n}\n.card { background: var(--theme-bg-primary); }\n",
    );
    touch(
        dir.path(),
        "src/Card.tsx",
        "<div className=\"bg-[var(--bg-cream)] text-[--text-navy] bg-[#fff] dark:bg-[#111]\" />\n",
    );
    touch(
        dir.path(),
        "src/Hero.tsx",
        "<h1 className=\"bg-[var(--bg-cream)] shadow-[var(--brand-glow)]\" />\n",
    );
    dir
}

fn analyze(root: &Path, extra: &BTreeMap<String, MappingTarget>) -> retint_core::AnalysisResult {
    let scan = Scanner::new(ScanOptions::new(root)).unwrap().collect();
    VariableAnalyzer::new(&AnalysisConfig::default(), extra)
        .unwrap()
        .analyze(&root.display().to_string(), &scan.files)
}

#[test]
fn test_inventory() {
    let dir = fixture();
    let result = analyze(dir.path(), &BTreeMap::new());

    assert_eq!(result.summary.files_analyzed, 3);
    assert_eq!(result.used["--bg-cream"].count, 2);
    assert_eq!(result.used["--bg-cream"].files.len(), 2);
    assert!(result.defined.contains_key("--theme-bg-primary"));

    assert_eq!(result.undefined, vec!["--brand-glow", "--text-navy"]);
    assert_eq!(result.unused, vec!["--legacy-unused"]);
    assert_eq!(result.summary.theme_aware, 1);
    assert_eq!(result.summary.non_theme_aware, 3);
    assert_eq!(result.summary.files_needing_refactoring, 2);
    assert_eq!(result.per_file["src/Card.tsx"], 2);
}

#[test]
fn test_suggestions_from_variable_mappings() {
    let dir = fixture();
    let mut extra = BTreeMap::new();
    extra.insert(
        "--brand-glow".to_string(),
        MappingTarget::from("--theme-shadow-lg"),
    );
    // Class targets are not variable suggestions.
    extra.insert(
        "--text-navy".to_string(),
        MappingTarget::from("text-theme-primary"),
    );
    let result = analyze(dir.path(), &extra);

    let suggestion = |name: &str| {
        result
            .non_theme_aware
            .iter()
            .find(|n| n.variable == name)
            .and_then(|n| n.suggestion.clone())
    };
    assert_eq!(suggestion("--bg-cream").as_deref(), Some("--theme-bg-primary"));
    assert_eq!(suggestion("--brand-glow").as_deref(), Some("--theme-shadow-lg"));
    assert_eq!(suggestion("--text-navy").as_deref(), Some("--theme-text-primary"));
}

#[test]
fn test_competing_styles_reported_per_file() {
    let dir = fixture();
    let result = analyze(dir.path(), &BTreeMap::new());

    assert_eq!(result.competing_styles.len(), 1);
    assert_eq!(result.competing_styles[0].file, "src/Card.tsx");
    assert_eq!(result.competing_styles[0].examples, vec!["bg-[#fff] dark:bg-[#111]"]);
}

#[test]
fn test_custom_theme_prefix() {
    let dir = fixture();
    let scan = Scanner::new(ScanOptions::new(dir.path())).unwrap().collect();
    let config = AnalysisConfig {
        theme_prefix: Some("--bg-".to_string()),
    };
    let result = VariableAnalyzer::new(&config, &BTreeMap::new())
        .unwrap()
        .analyze("root", &scan.files);

    assert_eq!(result.theme_prefix, "--bg-");
    assert!(result.non_theme_aware.iter().all(|n| !n.variable.starts_with("--bg-")));
    assert!(result
        .non_theme_aware
        .iter()
        .any(|n| n.variable == "--theme-bg-primary"));
}

#[test]
fn test_rendered_analysis_formats() {
    let dir = fixture();
    let result = analyze(dir.path(), &BTreeMap::new());

    let md = render_analysis(&result, ReportFormat::Markdown).unwrap();
    assert!(md.contains("## Unused definitions"));
    assert!(md.contains("- `--legacy-unused`"));
    assert!(md.contains("## Competing light/dark styles"));

    let console = render_analysis(&result, ReportFormat::Console).unwrap();
    assert!(console.starts_with("3 files, 4 variables used"));
    assert!(console.contains("--bg-cream -> --theme-bg-primary (2 uses)"));

    let html = render_analysis(&result, ReportFormat::Html).unwrap();
    assert!(html.contains("<code>--brand-glow</code>"));
}
