// ============================================================================
// discrip-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and context helpers
//
// The CLI reports failures with the core error type; these helpers attach
// the path or action that failed.

use discrip_core::{CoreError, CoreResult};
use std::io;
use std::path::Path;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Wraps an I/O error with the action and path that caused it, keeping the
/// original error kind.
pub fn path_error(action: &str, path: &Path, err: io::Error) -> CoreError {
    CoreError::Io(io::Error::new(
        err.kind(),
        format!("Failed to {action} '{}': {err}", path.display()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_error_keeps_kind_and_context() {
        let err = path_error(
            "create log directory",
            Path::new("/out/logs"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        match err {
            CoreError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied);
                assert!(inner.to_string().contains("create log directory '/out/logs'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
