//! Exit code constants for git-mgr.
//!
//! - 0: Success
//! - 1: User error (bad args, nothing scanned, missing directory)
//! - 2: Configuration error (unreadable or invalid config file)
//! - 3: Git failure (git missing, or a command failed in some repository)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or a command used in the wrong state.
pub const USER_ERROR: i32 = 1;

/// Configuration file could not be read, parsed, or validated.
pub const CONFIG_ERROR: i32 = 2;

/// Git could not be run, or a command failed in at least one repository.
pub const GIT_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, CONFIG_ERROR, GIT_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
