//! Path routing.
//!
//! # Responsibilities
//! - Match request paths against the two accepted shapes
//! - Normalize a trailing slash before matching
//! - Return an explicit no-match rather than a silent default
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex; the record-id shape is checked with plain string ops

/// The collection path exposed to the frontend.
pub const COLLECTION_PATH: &str = "/api/records";

/// Route shapes the proxy accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRoute {
    /// The bare collection: list, create, batch delete.
    Collection,
    /// A single record addressed by id.
    Record(String),
}

/// Match a request path against the accepted shapes.
///
/// One trailing slash is tolerated and normalized away. The record id
/// must be a single non-empty segment.
pub fn match_path(path: &str) -> Option<RecordRoute> {
    let path = path.strip_suffix('/').unwrap_or(path);

    if path == COLLECTION_PATH {
        return Some(RecordRoute::Collection);
    }

    let id = path.strip_prefix("/api/records/")?;
    if !id.is_empty() && !id.contains('/') {
        return Some(RecordRoute::Record(id.to_string()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_path() {
        assert_eq!(match_path("/api/records"), Some(RecordRoute::Collection));
    }

    #[test]
    fn test_collection_trailing_slash() {
        assert_eq!(match_path("/api/records/"), Some(RecordRoute::Collection));
    }

    #[test]
    fn test_record_path() {
        assert_eq!(
            match_path("/api/records/rec123"),
            Some(RecordRoute::Record("rec123".to_string()))
        );
        assert_eq!(
            match_path("/api/records/rec123/"),
            Some(RecordRoute::Record("rec123".to_string()))
        );
    }

    #[test]
    fn test_rejects_nested_segments() {
        assert_eq!(match_path("/api/records/rec123/fields"), None);
    }

    #[test]
    fn test_rejects_empty_id() {
        assert_eq!(match_path("/api/records//"), None);
    }

    #[test]
    fn test_rejects_other_paths() {
        assert_eq!(match_path("/"), None);
        assert_eq!(match_path("/api"), None);
        assert_eq!(match_path("/api/recordsx"), None);
        assert_eq!(match_path("/unknown/path"), None);
    }
}
