//! sam exit code constants

pub(crate) const SUCCESS: i32 = 0;
/// The command failed with an error that was reported to the user.
pub(crate) const USER_ERROR: i32 = 1;
/// The command failed with an error it doesn't know how to handle, such as an unexpected
/// rejection by the remote service.
pub(crate) const UNHANDLED_ERROR: i32 = 255;
