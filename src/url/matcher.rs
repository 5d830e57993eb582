/// Checks if a hostname matches a domain pattern using shell-glob semantics
///
/// Patterns without metacharacters require exact equality. Supported
/// metacharacters:
///
/// - `*` matches any run of characters, dots included, so `*.example.com`
///   covers both `blog.example.com` and `api.v2.example.com`
/// - `?` matches exactly one character
/// - `[abc]`, `[a-z]` and `[!abc]` match one character from (or outside) a set
///
/// Matching is case-sensitive. Hostnames produced by URL parsing are
/// already lowercase, so patterns should be written in lowercase too.
///
/// # Examples
///
/// ```
/// use sumi_drift::url::matches_glob;
///
/// assert!(matches_glob("example.com", "example.com"));
/// assert!(matches_glob("*.example.com", "blog.example.com"));
/// assert!(matches_glob("*.example.com", "api.v2.example.com"));
/// assert!(!matches_glob("*.example.com", "example.com"));
/// ```
pub fn matches_glob(pattern: &str, candidate: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let candidate: Vec<char> = candidate.chars().collect();

    let mut pi = 0;
    let mut ci = 0;
    // Position after the most recent `*` and the candidate index it is anchored at
    let mut backtrack: Option<(usize, usize)> = None;

    while ci < candidate.len() {
        if pi < pattern.len() {
            match pattern[pi] {
                '*' => {
                    backtrack = Some((pi + 1, ci));
                    pi += 1;
                    continue;
                }
                '?' => {
                    pi += 1;
                    ci += 1;
                    continue;
                }
                '[' => match match_class(&pattern, pi, candidate[ci]) {
                    Some((true, next)) => {
                        pi = next;
                        ci += 1;
                        continue;
                    }
                    Some((false, _)) => {}
                    // Unterminated class: treat the bracket literally
                    None => {
                        if candidate[ci] == '[' {
                            pi += 1;
                            ci += 1;
                            continue;
                        }
                    }
                },
                literal => {
                    if literal == candidate[ci] {
                        pi += 1;
                        ci += 1;
                        continue;
                    }
                }
            }
        }

        // Mismatch: let the last star swallow one more character
        match backtrack {
            Some((star_pi, star_ci)) => {
                pi = star_pi;
                ci = star_ci + 1;
                backtrack = Some((star_pi, star_ci + 1));
            }
            None => return false,
        }
    }

    // Trailing stars match the empty string
    while pi < pattern.len() && pattern[pi] == '*' {
        pi += 1;
    }

    pi == pattern.len()
}

/// Returns true if the pattern contains any glob metacharacter
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Evaluates a bracket expression starting at `start` (which holds `[`)
///
/// Returns whether `ch` is accepted and the index just past the closing
/// `]`, or None if the class is never closed.
fn match_class(pattern: &[char], start: usize, ch: char) -> Option<(bool, usize)> {
    let mut i = start + 1;
    let negate = matches!(pattern.get(i), Some('!') | Some('^'));
    if negate {
        i += 1;
    }

    let mut matched = false;
    let mut first = true;

    while i < pattern.len() {
        let c = pattern[i];
        if c == ']' && !first {
            return Some((matched != negate, i + 1));
        }

        if i + 2 < pattern.len() && pattern[i + 1] == '-' && pattern[i + 2] != ']' {
            if pattern[i] <= ch && ch <= pattern[i + 2] {
                matched = true;
            }
            i += 3;
        } else {
            if c == ch {
                matched = true;
            }
            i += 1;
        }
        first = false;
    }

    None
}
