//! HTML escaping shared by the renderer, the heading index and the search highlighter.

/// Escapes the characters that carry meaning in HTML attribute values.
///
/// | char | entity |
/// |------|--------|
/// | `&`  | `&amp;` |
/// | `"`  | `&quot;` |
/// | `<`  | `&lt;` |
/// | `>`  | `&gt;` |
/// | `'`  | `&#39;` |
pub fn escape_html(s: &str) -> String {
    escape_with(s, true)
}

/// Escapes text node content. Only `&`, `<` and `>` are replaced; quotes are
/// left as written.
pub fn escape_text(s: &str) -> String {
    escape_with(s, false)
}

fn escape_with(s: &str, quotes: bool) -> String {
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len());
    let mut start = 0;

    for (index, &byte) in bytes.iter().enumerate() {
        let replacement = match byte {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' if quotes => "&quot;",
            b'\'' if quotes => "&#39;",
            _ => continue,
        };

        result.push_str(&s[start..index]);
        result.push_str(replacement);
        start = index + 1;
    }

    if start == 0 {
        return s.to_string();
    }

    result.push_str(&s[start..]);
    result
}

const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
    ("laquo", '\u{ab}'),
    ("raquo", '\u{bb}'),
    ("hellip", '\u{2026}'),
    ("middot", '\u{b7}'),
    ("bull", '\u{2022}'),
    ("copy", '\u{a9}'),
    ("reg", '\u{ae}'),
    ("trade", '\u{2122}'),
    ("times", '\u{d7}'),
];

/// Longest entity we try to decode, `&` and `;` included.
const MAX_ENTITY_LEN: usize = 12;

/// Decodes character references: decimal, hex and the common named entities.
/// Unknown entities are left untouched.
pub fn unescape_html(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_entity(tail) {
            Some((ch, len)) => {
                result.push(ch);
                rest = &tail[len..];
            }
            None => {
                result.push('&');
                rest = &tail[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Decodes the entity at the start of `tail`, returning the char and the bytes consumed.
fn decode_entity(tail: &str) -> Option<(char, usize)> {
    let semicolon = tail.bytes().take(MAX_ENTITY_LEN).position(|byte| byte == b';')?;
    let name = tail.get(1..semicolon)?;

    let ch = match name.strip_prefix('#') {
        Some(number) => {
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None if number.bytes().all(|byte| byte.is_ascii_digit()) => number.parse().ok()?,
                None => return None,
            };
            char::from_u32(code)?
        }
        None => NAMED_ENTITIES
            .iter()
            .find(|(entity, _)| *entity == name)
            .map(|&(_, ch)| ch)?,
    };

    Some((ch, semicolon + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_special_characters() {
        assert_eq!(escape_html("&<>\"'"), "&amp;&lt;&gt;&quot;&#39;");
        assert_eq!(
            escape_html("<script>alert('xss')</script>"),
            "&lt;script&gt;alert(&#39;xss&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape_html("Real-time Analytics"), "Real-time Analytics");
        assert_eq!(escape_html(""), "");
        assert_eq!(escape_html("🚀 & 日本語"), "🚀 &amp; 日本語");
    }

    #[test]
    fn unescape_restores_escaped_text() {
        let original = "Machine Learning & MLOps <\"v2\"> it's";
        assert_eq!(unescape_html(&escape_html(original)), original);
    }

    #[test]
    fn text_escaping_leaves_quotes_alone() {
        assert_eq!(escape_text("It's a \"quoted\" line"), "It's a \"quoted\" line");
        assert_eq!(escape_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn unescape_decodes_named_and_numeric_entities() {
        assert_eq!(unescape_html("A&nbsp;B"), "A\u{a0}B");
        assert_eq!(unescape_html("&copy; 2025 &mdash; x"), "\u{a9} 2025 \u{2014} x");
        assert_eq!(unescape_html("&#65;&#x42;&#X43;"), "ABC");
    }

    #[test]
    fn unescape_keeps_unknown_entities() {
        assert_eq!(unescape_html("a &bogus; b &amp; c"), "a &bogus; b & c");
        assert_eq!(unescape_html("&#xZZ; &#; &#1114112;"), "&#xZZ; &#; &#1114112;");
        assert_eq!(unescape_html("trailing &"), "trailing &");
        assert_eq!(unescape_html("R&D; fast"), "R&D; fast");
    }
}
