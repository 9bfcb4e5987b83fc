// src/html.rs
//
// Minimal string-scanning helpers over raw HTML. The pages we deal with are
// plain server-rendered markup, so substring scanning is enough; no DOM.

/// ASCII-only lowercase. Non-ASCII passes through so byte offsets stay valid.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Find the next `<tag ...> ... </tag>` block at or after `from`,
/// case-insensitive. Returns the byte span including both tags.
pub fn next_block(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open = format!("<{}", to_lower(tag));
    let close = format!("</{}>", to_lower(tag));

    let mut at = from;
    loop {
        let start = lc.get(at..)?.find(&open)? + at;
        // Reject prefix hits like "<tr" inside "<track".
        let after = start + open.len();
        match lc.as_bytes().get(after) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') | Some(b'/') => {}
            _ => {
                at = after;
                continue;
            }
        }
        let open_end = s[start..].find('>')? + start + 1;
        let end_rel = lc[open_end..].find(&close)?;
        return Some((start, open_end + end_rel + close.len()));
    }
}

/// All `<tag>` block spans in document order.
pub fn blocks(s: &str, tag: &str) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((b, e)) = next_block(s, tag, pos) {
        out.push((b, e));
        pos = e;
    }
    out
}

/// Content between the end of the opening tag and the final closing tag.
pub fn inner(block: &str) -> &str {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return &block[oe + 1..cs];
            }
        }
    }
    ""
}

/// Read an attribute value from a block's opening tag.
/// Handles `name="v"`, `name='v'` and bare `name=v`.
pub fn attr(block: &str, name: &str) -> Option<String> {
    let open_end = block.find('>')?;
    let open = &block[..open_end];
    let lc = to_lower(open);
    let needle = format!("{}=", to_lower(name));

    let mut at = 0usize;
    loop {
        let i = lc.get(at..)?.find(&needle)? + at;
        // Must sit on a word boundary, not the tail of another attribute
        // ("href=" inside "data-href=").
        if i > 0 && matches!(lc.as_bytes()[i - 1], b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_') {
            at = i + needle.len();
            continue;
        }
        let rest = &open[i + needle.len()..];
        return Some(match rest.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let v = &rest[1..];
                v[..v.find(q).unwrap_or(v.len())].to_string()
            }
            _ => rest
                .split(|c: char| c.is_ascii_whitespace() || c == '>')
                .next()
                .unwrap_or("")
                .to_string(),
        });
    }
}

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Visible text of a block: entities resolved, tags stripped, whitespace folded.
pub fn text(block: &str) -> String {
    strip_tags(normalize_entities(inner(block)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_block_is_case_insensitive_and_boundary_safe() {
        let doc = "<TRACK src=x><TR class=a><td>1</td></TR>";
        let (b, e) = next_block(doc, "tr", 0).unwrap();
        assert_eq!(&doc[b..e], "<TR class=a><td>1</td></TR>");
    }

    #[test]
    fn blocks_enumerates_in_order() {
        let doc = "<td>a</td> junk <td>b</td><td>c</td>";
        let spans = blocks(doc, "td");
        assert_eq!(spans.len(), 3);
        let (b, e) = spans[1];
        assert_eq!(text(&doc[b..e]), "b");
    }

    #[test]
    fn attr_reads_quoted_and_bare_values() {
        let a = r#"<a class="btn" href="/stocks/a/history/?p=1y" data-url=alt>1 year</a>"#;
        assert_eq!(attr(a, "href").as_deref(), Some("/stocks/a/history/?p=1y"));
        assert_eq!(attr(a, "data-url").as_deref(), Some("alt"));
        assert_eq!(attr(a, "data-href"), None);
    }

    #[test]
    fn text_strips_nested_markup() {
        let td = "<td><span class=\"up\">1,234&nbsp;</span> <b>x</b></td>";
        assert_eq!(text(td), "1,234 x");
    }
}
