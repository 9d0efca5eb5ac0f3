/* 📖 # Pure path test suite

Cross-cutting coverage of the structural operations: parsing, joining,
ancestry, names and suffixes, matching and relative_to. Everything here
is pure; backend I/O is tested next to the backends themselves.
*/

#[cfg(test)]
mod tests {
    use crate::UrlPath;
    use expect_test::expect;

    #[test]
    fn test_round_trip_stability() {
        for raw in [
            "a/b/c",
            "/a/b/c",
            "http://example.com/a/b",
            "file:///etc/passwd",
            "https://example.com/",
            ".",
            "",
        ] {
            let parsed = UrlPath::new(raw);
            let reparsed = UrlPath::new(parsed.to_string());
            assert_eq!(parsed, reparsed, "round trip failed for {:?}", raw);
        }
    }

    #[test]
    fn test_join_single_segment_then_parent() {
        let joined = UrlPath::from_parts(["a/b", "c"]);
        assert_eq!(joined.parent(), UrlPath::new("a/b"));
    }

    #[test]
    fn test_scheme_transparency_in_equality() {
        // "x" becomes the netloc of "file://x/y", so these differ.
        assert_ne!(UrlPath::new("x/y"), UrlPath::new("file://x/y"));
        // With no netloc the implicit scheme equals the explicit one.
        assert_eq!(UrlPath::new("/x/y"), UrlPath::new("file:///x/y"));
        assert_eq!(UrlPath::new("x/y").scheme(), "");
    }

    #[test]
    fn test_equal_paths_hash_alike() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(UrlPath::new("/a/b"));
        assert!(set.contains(&UrlPath::new("file:///a/b")));
        assert!(!set.contains(&UrlPath::new("/a/c")));
    }

    #[test]
    fn test_parents_are_strictly_ascending_and_finite() {
        let path = UrlPath::new("a/b/c");
        let parents = path.parents();
        assert_eq!(
            parents,
            vec![UrlPath::new("a/b"), UrlPath::new("a"), UrlPath::new("")]
        );
        // "." and the empty path are the same normalized value.
        assert_eq!(parents[2], UrlPath::new("."));
    }

    #[test]
    fn test_root_is_its_own_parent() {
        let root = UrlPath::new("/");
        assert_eq!(root.parent(), root);
        // Must terminate even though the fixed point is reached immediately.
        assert_eq!(root.parents(), vec![root.clone()]);
    }

    #[test]
    fn test_url_parents_keep_scheme_and_netloc() {
        let path = UrlPath::new("http://example.com/a/b");
        assert_eq!(path.parent(), UrlPath::new("http://example.com/a"));
        assert_eq!(
            path.parent().parent(),
            UrlPath::new("http://example.com/")
        );
    }

    #[test]
    fn test_name_needs_two_segments() {
        assert_eq!(UrlPath::new("a/b").name(), "b");
        assert_eq!(UrlPath::new("a").name(), "");
        assert_eq!(UrlPath::new("/").name(), "");
        assert_eq!(UrlPath::new("").name(), "");
    }

    #[test]
    fn test_suffix_and_stem() {
        let path = UrlPath::new("a/b.tar.gz");
        assert_eq!(path.name(), "b.tar.gz");
        assert_eq!(path.stem(), "b.tar");
        assert_eq!(path.suffix(), ".gz");
        assert_eq!(path.suffixes(), vec![".tar", ".gz"]);
    }

    #[test]
    fn test_suffix_empty_without_dot() {
        let path = UrlPath::new("a/plain");
        assert_eq!(path.suffix(), "");
        assert!(path.suffixes().is_empty());
        assert_eq!(path.stem(), "plain");
    }

    #[test]
    fn test_is_absolute() {
        assert!(UrlPath::new("/a").is_absolute());
        assert!(UrlPath::new("http://host/a").is_absolute());
        assert!(!UrlPath::new("a/b").is_absolute());
    }

    #[test]
    fn test_as_uri_defaults_scheme_to_file() {
        assert_eq!(UrlPath::new("/etc/passwd").as_uri().unwrap(), "file:///etc/passwd");
        assert_eq!(
            UrlPath::new("http://example.com/a").as_uri().unwrap(),
            "http://example.com/a"
        );
    }

    #[test]
    fn test_as_uri_requires_absolute() {
        let error = UrlPath::new("a/b").as_uri().unwrap_err();
        expect!["relative path can't be expressed as a file URI"].assert_eq(&error.to_string());
    }

    #[test]
    fn test_relative_to_prefix() {
        assert_eq!(
            UrlPath::new("/a/b").relative_to("/a").unwrap(),
            UrlPath::new("b")
        );
        assert_eq!(
            UrlPath::new("http://host/a/b/c")
                .relative_to("http://host/a")
                .unwrap(),
            UrlPath::new("b/c")
        );
    }

    #[test]
    fn test_relative_to_mismatch_names_both_paths() {
        let error = UrlPath::new("/a/b").relative_to("/x").unwrap_err();
        expect!["'/a/b' does not start with '/x'"].assert_eq(&error.to_string());
    }

    #[test]
    fn test_relative_to_is_case_folded() {
        assert_eq!(
            UrlPath::new("/A/b").relative_to("/a").unwrap(),
            UrlPath::new("b")
        );
    }

    #[test]
    fn test_relative_to_empty_target() {
        // An empty target leaves a relative path untouched ...
        assert_eq!(
            UrlPath::new("a/b").relative_to("").unwrap(),
            UrlPath::new("a/b")
        );
        // ... but an absolute path does not start with "nothing".
        assert!(UrlPath::new("/a").relative_to("").is_err());
    }

    #[test]
    fn test_relative_to_scheme_transparency() {
        // The implicit scheme defaults to file on both sides.
        assert_eq!(
            UrlPath::new("/a/b").relative_to("file:///a").unwrap(),
            UrlPath::new("b")
        );
    }

    #[test]
    fn test_matches_trailing_segments() {
        let path = UrlPath::new("a/foo.py");
        assert!(path.matches("*.py").unwrap());
        assert!(path.matches("a/*.py").unwrap());
        assert!(!path.matches("b/*.py").unwrap());
    }

    #[test]
    fn test_matches_pattern_longer_than_path_fails() {
        let path = UrlPath::new("a/b");
        assert!(!path.matches("x/a/b").unwrap());
    }

    #[test]
    fn test_matches_rooted_pattern_requires_exact_length() {
        let path = UrlPath::new("/a/b");
        assert!(path.matches("/a/*").unwrap());
        assert!(!path.matches("/*").unwrap());
    }

    #[test]
    fn test_matches_scheme_and_netloc_folding() {
        let path = UrlPath::new("http://Host/a.py");
        assert!(path.matches("HTTP://host/a.py").unwrap());
        assert!(!path.matches("ftp://host/a.py").unwrap());
        // The implicit local scheme counts as file.
        assert!(UrlPath::new("/a/b.py").matches("file:///a/*.py").unwrap());
    }

    #[test]
    fn test_matches_folds_pattern_but_not_path() {
        // The pattern is lowercased before matching; the path is not.
        let path = UrlPath::new("a/Foo.py");
        assert!(!path.matches("FOO.*").unwrap());
        assert!(UrlPath::new("a/foo.py").matches("FOO.*").unwrap());
    }

    #[test]
    fn test_matches_empty_pattern_is_an_error() {
        let error = UrlPath::new("a/b").matches("").unwrap_err();
        expect!["empty pattern"].assert_eq(&error.to_string());
    }

    #[test]
    fn test_with_name() {
        assert_eq!(
            UrlPath::new("/a/b.txt").with_name("c.md").unwrap(),
            UrlPath::new("/a/c.md")
        );
    }

    #[test]
    fn test_with_name_fails_without_name() {
        assert!(UrlPath::new("/").with_name("x").is_err());
        assert!(UrlPath::new("").with_name("x").is_err());
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(
            UrlPath::new("/a/b.tar.gz").with_suffix(".zip").unwrap(),
            UrlPath::new("/a/b.tar.zip")
        );
    }

    #[test]
    fn test_joinpath_multiple_parts() {
        let path = UrlPath::new("/a").joinpath(["b", "c/d"]);
        assert_eq!(path, UrlPath::new("/a/b/c/d"));
    }

    #[test]
    fn test_join_inherits_scheme_and_netloc() {
        let path = UrlPath::from_parts(["http://host", "a/b"]);
        assert_eq!(path.scheme(), "http");
        assert_eq!(path.netloc(), "host");
        assert_eq!(path.to_string(), "http://host/a/b");
    }

    #[test]
    fn test_from_iterator() {
        let path: UrlPath = ["/a", "b"].into_iter().collect();
        assert_eq!(path, UrlPath::new("/a/b"));
    }

    #[test]
    fn test_join_with_path_argument() {
        let base = UrlPath::new("http://host/dir");
        let child = UrlPath::new("file.txt");
        assert_eq!(base.join(&child), UrlPath::new("http://host/dir/file.txt"));
    }

    #[test]
    fn test_query_and_fragment_are_stripped() {
        let path = UrlPath::new("http://host/a?page=2#top");
        assert_eq!(path.to_string(), "http://host/a");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let path = UrlPath::new("http://example.com/a/b");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"http://example.com/a/b\"");
        let back: UrlPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
