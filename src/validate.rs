//! Format validators for the natural identifiers used across the catalog.
//!
//! Both validators are pure and total: they never perform I/O and their only
//! failure mode is returning `false`. Callers translate a `false` result into
//! the matching domain error ([`InvalidUuid`](crate::CatalogError::InvalidUuid)
//! or [`InvalidEmail`](crate::CatalogError::InvalidEmail)).

use regex::Regex;
use std::sync::LazyLock;

/// MTGJSON v4 card ids are UUID-shaped (8-4-4-4-12 hex groups) with the
/// version nibble fixed to `5` and the variant nibble in `{8, 9, a, b}`.
pub const UUID_PATTERN: &str =
    r"^[0-9a-f]{8}-[0-9a-f]{4}-5[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

const EMAIL_PATTERN: &str = r"^[\w\.-]+@[a-zA-Z\d\.-]+\.[a-zA-Z]{2,}$";

static UUID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UUID_PATTERN).expect("invalid UUID pattern"));

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("invalid email pattern"));

/// Check whether `uuid` is a valid MTGJSON v4 card id.
pub fn validate_uuid(uuid: &str) -> bool {
    UUID_REGEX.is_match(uuid)
}

/// Check whether `email` has a standard `local@domain.tld` shape.
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
