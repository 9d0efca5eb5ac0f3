/* 📖 # What does the parser normalize?

Every path is reduced to four components: a lowercased scheme, a network
location, a root marker ("/" or empty) and the ordered path segments.
Query strings and fragments are stripped and ignored; legacy ";params"
are stripped only for the schemes that historically carry them. Segments
never contain the separator, and "" and "." segments are dropped.
*/

/// The separator character used for all urlpath values.
pub(crate) const SEP: char = '/';

/// Schemes whose final path segment may carry legacy `;params`.
/// The `file` scheme is deliberately absent.
const USES_PARAMS: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtspu", "sip", "sips",
    "mms", "sftp", "tel",
];

/// One raw input split into its URL components.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SplitPart {
    pub scheme: String,
    pub netloc: String,
    pub root: String,
    pub path: String,
}

/// The combined result of parsing a full argument list.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Parsed {
    pub scheme: String,
    pub netloc: String,
    pub root: String,
    pub segments: Vec<String>,
}

/// Splits `scheme:` off the front of a part.
///
/// A scheme must start with an ASCII letter and contain only ASCII
/// alphanumerics, `+`, `-` or `.`; anything else leaves the part untouched.
/// The scheme is lowercased.
fn split_scheme(part: &str) -> (String, &str) {
    if let Some(idx) = part.find(':') {
        let candidate = &part[..idx];
        let mut chars = candidate.chars();
        let valid = match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            }
            _ => false,
        };
        if valid {
            return (candidate.to_ascii_lowercase(), &part[idx + 1..]);
        }
    }
    (String::new(), part)
}

/// Strips a trailing `;params` section from the final path segment.
fn strip_params(path: &str) -> &str {
    let start = path.rfind(SEP).unwrap_or(0);
    match path[start..].find(';') {
        Some(idx) => &path[..start + idx],
        None => path,
    }
}

/// Parses a single URL part into `(scheme, netloc, root, relative path)`.
///
/// A part is rooted when it carries a netloc, an explicit scheme, or a path
/// beginning with the separator; rooted parts report `root = "/"` and their
/// path with all leading separators removed.
pub(crate) fn split_part(part: &str) -> SplitPart {
    let (scheme, rest) = split_scheme(part);

    let (netloc, rest) = if let Some(after) = rest.strip_prefix("//") {
        let end = after.find(['/', '?', '#']).unwrap_or(after.len());
        (&after[..end], &after[end..])
    } else {
        ("", rest)
    };

    let rest = rest.split('#').next().unwrap_or("");
    let rest = rest.split('?').next().unwrap_or("");
    let path = if USES_PARAMS.contains(&scheme.as_str()) {
        strip_params(rest)
    } else {
        rest
    };

    if !netloc.is_empty() || !scheme.is_empty() || path.starts_with(SEP) {
        SplitPart {
            scheme,
            netloc: netloc.to_string(),
            root: SEP.to_string(),
            path: path.trim_start_matches(SEP).to_string(),
        }
    } else {
        SplitPart {
            scheme: String::new(),
            netloc: String::new(),
            root: String::new(),
            path: path.to_string(),
        }
    }
}

/// Right-to-left scan for the first part carrying a non-empty scheme.
fn search_scheme(parts: &[String]) -> String {
    for part in parts.iter().rev() {
        if part.is_empty() {
            continue;
        }
        let scheme = split_part(part).scheme;
        if !scheme.is_empty() {
            return scheme;
        }
    }
    String::new()
}

/// Right-to-left scan for the first part carrying a non-empty netloc.
fn search_netloc(parts: &[String]) -> String {
    for part in parts.iter().rev() {
        if part.is_empty() {
            continue;
        }
        let netloc = split_part(part).netloc;
        if !netloc.is_empty() {
            return netloc;
        }
    }
    String::new()
}

/* 📖 # Why are parts combined right to left?

Filesystem join semantics: an absolute path discards everything before it,
so the rightmost rooted part wins. Scanning from the right lets us stop at
the first rooted part; everything collected on the way is the relative
tail that follows it.
*/

/// Combines raw parts into the normalized four-component form.
///
/// Segments are accumulated right to left until a rooted part is found.
/// If the rooted part itself lacks a scheme or netloc, a secondary scan
/// inherits the first non-empty scheme and netloc from the full argument
/// list, so `("http://host", "a/b")` keeps its scheme even though `"a/b"`
/// carries none.
pub(crate) fn parse_parts(parts: &[String]) -> Parsed {
    let mut segments: Vec<String> = Vec::new();
    let mut scheme = String::new();
    let mut netloc = String::new();
    let mut root = String::new();

    for part in parts.iter().rev() {
        if part.is_empty() {
            continue;
        }

        let split = split_part(part);
        scheme = split.scheme;
        netloc = split.netloc;
        root = split.root;

        for segment in split.path.split(SEP).rev() {
            if !segment.is_empty() && segment != "." {
                segments.push(segment.to_string());
            }
        }

        if !root.is_empty() {
            // Search for a scheme or netloc if none are set when the root
            // has been found.
            if scheme.is_empty() || netloc.is_empty() {
                scheme = search_scheme(parts);
                netloc = search_netloc(parts);
            }
            break;
        }
    }

    segments.reverse();
    Parsed {
        scheme,
        netloc,
        root,
        segments,
    }
}

/// Renders components back into their string form.
/// The `scheme://netloc` prefix is omitted when both are empty.
pub(crate) fn format_parsed_parts(
    scheme: &str,
    netloc: &str,
    root: &str,
    segments: &[String],
) -> String {
    let rendered = format!("{}{}", root, segments.join("/"));
    if !scheme.is_empty() || !netloc.is_empty() {
        format!("{}://{}{}", scheme, netloc, rendered)
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_part_relative() {
        let split = split_part("a/b/c");
        assert_eq!(split.scheme, "");
        assert_eq!(split.netloc, "");
        assert_eq!(split.root, "");
        assert_eq!(split.path, "a/b/c");
    }

    #[test]
    fn test_split_part_rooted() {
        let split = split_part("/a/b");
        assert_eq!(split.root, "/");
        assert_eq!(split.path, "a/b");
    }

    #[test]
    fn test_split_part_url() {
        let split = split_part("http://example.com/a/b");
        assert_eq!(split.scheme, "http");
        assert_eq!(split.netloc, "example.com");
        assert_eq!(split.root, "/");
        assert_eq!(split.path, "a/b");
    }

    #[test]
    fn test_split_part_scheme_is_lowercased() {
        let split = split_part("HTTP://Example.com/x");
        assert_eq!(split.scheme, "http");
        assert_eq!(split.netloc, "Example.com");
    }

    #[test]
    fn test_split_part_scheme_implies_root() {
        let split = split_part("http:");
        assert_eq!(split.scheme, "http");
        assert_eq!(split.root, "/");
        assert_eq!(split.path, "");
    }

    #[test]
    fn test_split_part_invalid_scheme_stays_in_path() {
        let split = split_part("1http://x");
        assert_eq!(split.scheme, "");
        assert_eq!(split.path, "1http://x");
    }

    #[test]
    fn test_split_part_strips_query_and_fragment() {
        let split = split_part("http://host/a?query=1#frag");
        assert_eq!(split.path, "a");
    }

    #[test]
    fn test_split_part_strips_params_for_http() {
        let split = split_part("http://host/a;param=1");
        assert_eq!(split.path, "a");
    }

    #[test]
    fn test_split_part_keeps_params_for_file() {
        let split = split_part("file:///a;param=1");
        assert_eq!(split.path, "a;param=1");
    }

    #[test]
    fn test_split_part_netloc_ends_at_separator() {
        let split = split_part("http://host//x");
        assert_eq!(split.netloc, "host");
        assert_eq!(split.path, "x");
    }

    #[test]
    fn test_parse_parts_drops_dot_and_empty_segments() {
        let parsed = parse_parts(&parts(&["a/./b//c"]));
        assert_eq!(parsed.segments, vec!["a", "b", "c"]);
        assert_eq!(parsed.root, "");
    }

    #[test]
    fn test_parse_parts_rightmost_root_wins() {
        let parsed = parse_parts(&parts(&["a/b", "/x", "y"]));
        assert_eq!(parsed.root, "/");
        assert_eq!(parsed.segments, vec!["x", "y"]);
    }

    #[test]
    fn test_parse_parts_inherits_scheme_and_netloc() {
        let parsed = parse_parts(&parts(&["http://host", "a/b"]));
        assert_eq!(parsed.scheme, "http");
        assert_eq!(parsed.netloc, "host");
        assert_eq!(parsed.root, "/");
        assert_eq!(parsed.segments, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_parts_all_relative() {
        let parsed = parse_parts(&parts(&["a", "b/c"]));
        assert_eq!(parsed.scheme, "");
        assert_eq!(parsed.netloc, "");
        assert_eq!(parsed.root, "");
        assert_eq!(parsed.segments, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_parts_empty_input() {
        let parsed = parse_parts(&[]);
        assert_eq!(parsed.segments, Vec::<String>::new());
        assert_eq!(parsed.root, "");
    }

    #[test]
    fn test_format_parsed_parts_local() {
        let segments = vec!["a".to_string(), "b".to_string()];
        assert_eq!(format_parsed_parts("", "", "/", &segments), "/a/b");
        assert_eq!(format_parsed_parts("", "", "", &segments), "a/b");
    }

    #[test]
    fn test_format_parsed_parts_url() {
        let segments = vec!["a".to_string()];
        assert_eq!(
            format_parsed_parts("http", "example.com", "/", &segments),
            "http://example.com/a"
        );
    }
}
