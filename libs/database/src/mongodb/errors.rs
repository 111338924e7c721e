use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Server error code for a unique index violation, including `_id` clashes
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Whether a driver error reports a duplicate key
///
/// Inserts surface it as a write error; some server versions report it as a
/// command error instead.
pub fn is_duplicate_key(err: &Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
