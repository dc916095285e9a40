//! Exit codes following sysexits.h conventions.
//!
//! These codes provide semantic meaning for different failure modes,
//! enabling scripts and CI systems to handle errors appropriately.

use arcnet_core::ArcnetError;

/// Successful execution.
pub const SUCCESS: u8 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: u8 = 1;

/// Command line usage error (invalid arguments).
/// Maps to EX_USAGE from sysexits.h.
pub const USAGE_ERROR: u8 = 64;

/// Data format error (malformed or empty SRS report).
/// Maps to EX_DATAERR from sysexits.h.
pub const DATA_ERROR: u8 = 65;

/// No input: no SRS report for the requested time, or no archive directory.
/// Maps to EX_NOINPUT from sysexits.h.
pub const NO_INPUT: u8 = 66;

/// Service unavailable (archive unreachable, download failed).
/// Maps to EX_UNAVAILABLE from sysexits.h.
pub const UNAVAILABLE: u8 = 69;

/// Help text listing the exit codes.
pub const HELP: &str = "\
Exit codes:
  0   Success
  1   General error
  64  Usage error (invalid arguments)
  65  SRS report malformed or empty
  66  No SRS report within 12 hours of the requested time
  69  SRS archive unavailable";

/// Represents an exit code with optional error context.
pub struct ExitCode {
    pub code: u8,
    pub message: Option<String>,
}

impl ExitCode {
    pub const fn success() -> Self {
        Self {
            code: SUCCESS,
            message: None,
        }
    }

    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");

        // Classify error by inspecting the chain
        let code = err
            .chain()
            .find_map(|cause| {
                if let Some(e) = cause.downcast_ref::<ArcnetError>() {
                    return Some(match e {
                        ArcnetError::ReportNotFound { .. } => NO_INPUT,
                        ArcnetError::ReportDownload { .. } | ArcnetError::ArchiveError(_) => {
                            UNAVAILABLE
                        }
                        ArcnetError::ReportMissing { .. } | ArcnetError::ReportParse { .. } => {
                            DATA_ERROR
                        }
                    });
                }
                cause
                    .downcast_ref::<std::io::Error>()
                    .filter(|e| e.kind() == std::io::ErrorKind::NotFound)
                    .map(|_| NO_INPUT)
            })
            .unwrap_or(GENERAL_ERROR);

        Self {
            code,
            message: Some(message),
        }
    }
}
