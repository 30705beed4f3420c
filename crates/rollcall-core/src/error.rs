//! Error types for `rollcall-core`.

use thiserror::Error;

/// Why a form submission was refused before reaching the store.
///
/// The `Display` text is what the client shows under the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  /// A text field is blank or a number field does not parse.
  #[error("Please fill in every field correctly.")]
  Incomplete,

  #[error("Term must be greater than 0 and absences cannot be negative.")]
  OutOfRange,

  /// Another record already uses this subject name (case-insensitive).
  #[error("This subject is already registered.")]
  Duplicate,
}
