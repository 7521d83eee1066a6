use crate::Vars;

/// Reports whether `text` matches `pattern`, extracting named captures
/// into `vars`.
///
/// The pattern syntax is:
///
/// ```text
/// pattern:
///     { term }
/// term:
///     '*'          matches any sequence of non-/ characters
///     '{' name '}' named capture (name must be non-empty); matches any
///                  sequence of non-/ characters, bound under name
///     '?'          matches any single non-/ character
///     c            matches character c (c != '*', '?', '{')
/// ```
///
/// The pattern must match all of `text`, not just a substring. A `?` consumes
/// a whole code point, so a multi-byte character satisfies exactly one `?`.
/// On success `vars` holds one entry per distinct named capture, in pattern
/// order; on failure `vars` is reset so bindings from abandoned backtracking
/// never leak out.
///
/// ```rust
/// use globmux::{matches, Vars};
///
/// let mut vars = Vars::new();
/// assert!(matches("/blog/{category}/{post}", "/blog/rust/glob-matching", &mut vars));
/// assert_eq!(vars.get("category"), "rust");
/// assert_eq!(vars.get("post"), "glob-matching");
///
/// // wildcards never cross a path separator
/// assert!(!matches("/blog/{slug}", "/blog/rust/glob-matching", &mut vars));
/// assert!(vars.is_empty());
/// ```
pub fn matches(pattern: &str, text: &str, vars: &mut Vars) -> bool {
    let pat = pattern.as_bytes();
    let txt = text.as_bytes();

    // Scan cursors into the pattern and text.
    let mut px = 0;
    let mut tx = 0;

    // Retry point of the most recent unresolved wildcard.
    let mut next_px = 0;
    let mut next_tx = 0;

    // Most recently opened named capture: its key, the start of its span in
    // the text, and the end of its `{name}` term in the pattern.
    let mut key = "";
    let mut vx = 0;
    let mut nx = 0;

    while px < pat.len() || tx < txt.len() {
        if px < pat.len() {
            match pat[px] {
                b'?' => {
                    if tx < txt.len() && txt[tx] != b'/' {
                        px += 1;
                        tx += codepoint_width(txt[tx]);
                        continue;
                    }
                }
                c @ (b'*' | b'{') => {
                    // Try to match at tx. If that doesn't work out,
                    // restart at tx+1 next.
                    next_px = px;
                    next_tx = tx + 1;
                    px += 1;
                    if c == b'{' {
                        // Reopening the same capture after a retry keeps its
                        // original start, so the span grows with each retry.
                        if nx < px {
                            vx = tx;
                            nx = pat[px..]
                                .iter()
                                .position(|&b| b == b'}')
                                .map_or(pat.len(), |i| px + i);
                            key = &pattern[px..nx];
                        }
                        px += key.len() + 1;
                    }
                    continue;
                }
                c => {
                    if tx < txt.len() && txt[tx] == c {
                        // A literal following `}` closes the capture; rebind
                        // it so the span reflects any backtracking since.
                        if px > 0 && pat[px - 1] == b'}' {
                            vars.set(key, &String::from_utf8_lossy(&txt[vx..tx]));
                        }
                        px += 1;
                        tx += 1;
                        continue;
                    }
                }
            }
        }

        if next_tx > 0 && next_tx <= txt.len() {
            px = next_px;
            tx = next_tx;
            // Variable-length wildcards cannot skip '/'.
            if txt[tx - 1] != b'/' {
                continue;
            }
        }

        vars.reset();
        return false;
    }

    // A trailing capture is closed by the end of the pattern.
    if px > 0 && pat.get(px - 1) == Some(&b'}') {
        vars.set(key, &String::from_utf8_lossy(&txt[vx..tx]));
    }

    true
}

// Width in bytes of the UTF-8 sequence starting with `b`, or 1 if `b` cannot
// start a sequence. Wildcard retries step one byte at a time, so the scan can
// land inside a multi-byte character; decoding must not assume a boundary.
fn codepoint_width(b: u8) -> usize {
    match b {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::codepoint_width;

    #[test]
    fn utf8_widths() {
        assert_eq!(codepoint_width(b'a'), 1);
        assert_eq!(codepoint_width("é".as_bytes()[0]), 2);
        assert_eq!(codepoint_width("☺".as_bytes()[0]), 3);
        assert_eq!(codepoint_width("🦀".as_bytes()[0]), 4);
        // continuation bytes do not start a sequence
        assert_eq!(codepoint_width("é".as_bytes()[1]), 1);
    }
}
