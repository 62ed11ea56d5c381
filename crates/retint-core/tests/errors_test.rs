//! Error codes and conversions.

use std::path::PathBuf;

use retint_core::errors::error_code;
use retint_core::errors::{
    ConfigError, PipelineError, ReportError, RetintErrorCode, RewriteError, RuleError, ScanError,
};

fn io_error() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")
}

#[test]
fn test_every_variant_has_a_code() {
    let cases = [
        (
            ConfigError::FileNotFound { path: "x".into() }.error_code(),
            error_code::CONFIG_ERROR,
        ),
        (
            ScanError::InvalidRoot {
                path: PathBuf::from("/nope"),
            }
            .error_code(),
            error_code::SCAN_ERROR,
        ),
        (
            ScanError::FileRead {
                path: PathBuf::from("a.tsx"),
                source: io_error(),
            }
            .error_code(),
            error_code::READ_ERROR,
        ),
        (
            RewriteError::Write {
                path: PathBuf::from("a.tsx"),
                source: io_error(),
            }
            .error_code(),
            error_code::WRITE_ERROR,
        ),
        (
            RewriteError::BackupMismatch {
                path: PathBuf::from("a.tsx"),
                backup: PathBuf::from("a.tsx.backup"),
            }
            .error_code(),
            error_code::BACKUP_ERROR,
        ),
        (
            RuleError::DuplicateRule("r".into()).error_code(),
            error_code::RULE_ERROR,
        ),
        (
            ReportError::UnknownFormat("pdf".into()).error_code(),
            error_code::REPORT_ERROR,
        ),
    ];

    for (code, expected) in cases {
        assert_eq!(code, expected);
    }
}

#[test]
fn test_coded_string_prefixes_code() {
    let err = RuleError::ChainedMapping {
        source_token: "--a".into(),
        target: "--b".into(),
    };
    let coded = err.coded_string();
    assert!(coded.starts_with("[RULE_ERROR] "));
    assert!(coded.contains("--a"));
    assert!(coded.contains("--b"));
}

#[test]
fn test_pipeline_error_keeps_inner_code() {
    let err: PipelineError = ScanError::InvalidRoot {
        path: PathBuf::from("/missing"),
    }
    .into();
    assert_eq!(err.error_code(), error_code::SCAN_ERROR);
    assert!(err.to_string().contains("/missing"));

    let err: PipelineError = ConfigError::InvalidValue {
        field: "scan.threads".into(),
        message: "bad".into(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::CONFIG_ERROR);
}

#[test]
fn test_scan_error_path() {
    let err = ScanError::DirectoryRead {
        path: PathBuf::from("src/locked"),
        message: "denied".into(),
    };
    assert_eq!(err.path(), Some(PathBuf::from("src/locked").as_path()));

    let err = ScanError::InvalidPattern {
        pattern: "[".into(),
        message: "unclosed".into(),
    };
    assert_eq!(err.path(), None);
}
