#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use uuid::Uuid;

use crate::constants::CONTROL_PREFIX;

/// Derives a legal Java identifier from a UUID.
///
/// UUIDs may start with a digit and contain dashes; identifiers may do
/// neither, so a leading letter is prepended and dashes become
/// underscores.
pub fn java_identifier_from(id: &Uuid) -> String {
    format!("a{}", id.to_string().replace('-', "_"))
}

/// Derives a short helper-variable prefix from a UUID (dashes stripped).
pub fn helper_prefix(id: &Uuid) -> String {
    format!("a{}", id.simple())
}

/// Builds the control marker injected in front of every harness print:
/// `ctr-<signingKey>-<kind>: `.
pub fn signing_marker(key: &Uuid, kind: &str) -> String {
    format!("{CONTROL_PREFIX}{key}-{kind}: ")
}
