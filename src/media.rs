//! Media type handling for the `Content-Type` of inbound requests.

use std::fmt;
use std::str::FromStr;

use mime::Mime;

use crate::error::Error;

/// A parsed media type such as `application/json; charset=UTF-8`.
///
/// Type and subtype compare case-insensitively. Parameter values are
/// returned without surrounding quotes.
///
/// # Examples
///
/// ```
/// use delegated_auth::ContentType;
///
/// let ct: ContentType = "Application/JSON; charset=\"ISO-8859-1\"".parse().unwrap();
/// assert!(ct.is("application", "json"));
/// assert_eq!(ct.charset(), Some("ISO-8859-1"));
/// assert_eq!(ct.essence(), "application/json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType(Mime);

impl ContentType {
    /// Returns the top-level type, e.g. `application`.
    pub fn type_(&self) -> &str {
        self.0.type_().as_str()
    }

    /// Returns the subtype, e.g. `json`.
    pub fn subtype(&self) -> &str {
        self.0.subtype().as_str()
    }

    /// Returns `type/subtype` without parameters.
    pub fn essence(&self) -> &str {
        self.0.essence_str()
    }

    /// Returns true when type and subtype match, ignoring case.
    pub fn is(&self, type_: &str, subtype: &str) -> bool {
        self.type_().eq_ignore_ascii_case(type_) && self.subtype().eq_ignore_ascii_case(subtype)
    }

    /// Looks up a parameter by (case-insensitive) name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.0
            .params()
            .find(|(k, _)| k.as_str().eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str().trim_matches('"'))
    }

    /// Returns the declared charset label, if any.
    pub fn charset(&self) -> Option<&str> {
        self.param(mime::CHARSET.as_str())
    }

    /// The underlying [`Mime`].
    pub fn as_mime(&self) -> &Mime {
        &self.0
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        raw.parse::<Mime>()
            .map(Self)
            .map_err(|_| Error::UnsupportedContentType(raw.to_string()))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn parses_plain_type() {
        let ct: ContentType = "application/json".parse().unwrap();
        assert_eq!(ct.type_(), "application");
        assert_eq!(ct.subtype(), "json");
        assert_eq!(ct.charset(), None);
    }

    #[test]
    fn lowercases_type_and_reads_charset() {
        let ct: ContentType = "TEXT/Plain;charset=UTF-8".parse().unwrap();
        assert_eq!(ct.essence(), "text/plain");
        assert!(ct.charset().is_some_and(|c| c.eq_ignore_ascii_case("utf-8")));
    }

    #[test]
    fn keeps_other_charset_labels() {
        let ct: ContentType = "application/json; charset=ISO-8859-1".parse().unwrap();
        assert_eq!(ct.charset(), Some("ISO-8859-1"));
    }

    #[test]
    fn quoted_values_are_unquoted() {
        let ct: ContentType = r#"multipart/form-data; boundary="a;b"; charset=utf-8"#
            .parse()
            .unwrap();
        assert_eq!(ct.param("boundary"), Some("a;b"));
        assert_eq!(ct.charset(), Some("utf-8"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let ct: ContentType = "  application/json  ".parse().unwrap();
        assert!(ct.is("application", "json"));
    }

    #[test]
    fn rejects_missing_subtype() {
        let err = "application".parse::<ContentType>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedContentType);
        assert!(err.to_string().contains("application"));
    }

    #[test]
    fn rejects_empty_input() {
        assert!("".parse::<ContentType>().is_err());
        assert!(" / ".parse::<ContentType>().is_err());
    }

    #[test]
    fn display_starts_with_essence() {
        let ct: ContentType = "application/json; charset=utf-8".parse().unwrap();
        assert!(ct.to_string().starts_with("application/json"));
    }
}
