//! Channel path handling
//!
//! Channel paths are delimiter-separated strings such as `"app:user:login"`.
//! Each delimiter-separated component is a segment addressing one level of
//! the namespace tree.
//!
//! String paths are split verbatim: a path like `"a::b"` has an empty middle
//! segment, and the caller is responsible for not embedding the delimiter in
//! a segment. [`ChannelPath::join`] builds a path from segments and rejects
//! segments that would be split apart again.

use super::error::MediatorError;

/// Helpers for splitting and joining channel paths
pub struct ChannelPath;

impl ChannelPath {
    /// Split a path into its segments
    ///
    /// An empty path has no segments.
    pub fn split<'a>(path: &'a str, delimiter: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let mut segments = path.split(delimiter);
        if path.is_empty() {
            // str::split yields one empty item for an empty input
            segments.next();
        }
        segments
    }

    /// Collect the owned segments of a path
    pub fn segments(path: &str, delimiter: &str) -> Vec<String> {
        Self::split(path, delimiter).map(str::to_owned).collect()
    }

    /// Join segments into a channel path
    ///
    /// Fails if any segment contains the delimiter.
    pub fn join<S: AsRef<str>>(segments: &[S], delimiter: &str) -> Result<String, MediatorError> {
        if delimiter.is_empty() {
            return Err(MediatorError::InvalidDelimiter);
        }

        let mut path = String::new();
        for (i, segment) in segments.iter().enumerate() {
            let segment = segment.as_ref();
            if segment.contains(delimiter) {
                return Err(MediatorError::InvalidSegment {
                    segment: segment.to_string(),
                    delimiter: delimiter.to_string(),
                });
            }
            if i > 0 {
                path.push_str(delimiter);
            }
            path.push_str(segment);
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_segments() {
        assert_eq!(
            ChannelPath::segments("app:user:login", ":"),
            vec!["app", "user", "login"]
        );
        assert_eq!(ChannelPath::segments("app", ":"), vec!["app"]);
    }

    #[test]
    fn test_split_empty_path() {
        assert_eq!(ChannelPath::split("", ":").count(), 0);
    }

    #[test]
    fn test_split_keeps_empty_segments() {
        assert_eq!(ChannelPath::segments("a::b", ":"), vec!["a", "", "b"]);
        assert_eq!(ChannelPath::segments("a:", ":"), vec!["a", ""]);
    }

    #[test]
    fn test_split_multi_char_delimiter() {
        assert_eq!(ChannelPath::segments("a::b:c", "::"), vec!["a", "b:c"]);
    }

    #[test]
    fn test_join() {
        let path = ChannelPath::join(&["app", "user", "login"], ":").unwrap();
        assert_eq!(path, "app:user:login");

        let path = ChannelPath::join(&["a", "b"], "/").unwrap();
        assert_eq!(path, "a/b");
    }

    #[test]
    fn test_join_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(ChannelPath::join(&empty, ":").unwrap(), "");
    }

    #[test]
    fn test_join_rejects_delimiter_in_segment() {
        let result = ChannelPath::join(&["app", "user:login"], ":");

        match result {
            Err(MediatorError::InvalidSegment { segment, delimiter }) => {
                assert_eq!(segment, "user:login");
                assert_eq!(delimiter, ":");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_join_rejects_empty_delimiter() {
        assert!(matches!(
            ChannelPath::join(&["a"], ""),
            Err(MediatorError::InvalidDelimiter)
        ));
    }
}
