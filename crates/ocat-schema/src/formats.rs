//! # Custom String Formats
//!
//! Formats asserted on entity fields. Empty-permitting variants exist
//! because canonical entities hydrate absent strings to `""`.

use jsonschema::ValidationOptions;

/// An absolute URL.
pub const URL: &str = "url";

/// Empty, or an absolute URL.
pub const OPTIONAL_URL: &str = "optional-url";

/// Empty, or an RFC 3339 date-time.
pub const OPTIONAL_DATE_TIME: &str = "optional-date-time";

/// Returns true if `s` parses as an absolute URL.
pub fn is_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

/// Returns true if `s` is empty or an absolute URL.
pub fn is_optional_url(s: &str) -> bool {
    s.is_empty() || is_url(s)
}

/// Returns true if `s` is empty or an RFC 3339 date-time.
pub fn is_optional_date_time(s: &str) -> bool {
    s.is_empty() || chrono::DateTime::parse_from_rfc3339(s).is_ok()
}

/// Register every custom format on a set of validation options.
pub(crate) fn register(opts: &mut ValidationOptions) {
    opts.with_format(URL, is_url);
    opts.with_format(OPTIONAL_URL, is_optional_url);
    opts.with_format(OPTIONAL_DATE_TIME, is_optional_date_time);
}
