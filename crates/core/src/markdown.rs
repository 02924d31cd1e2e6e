//! Line-oriented renderer for the small markdown dialect used by the blog articles.
//!
//! Supported, in precedence order:
//!
//! - ATX headings `#` through `####` (a space must follow the hashes)
//! - `**strong**` and `*emphasis*`
//! - single-level unordered (`-`, `*`, `+`) and ordered (`1.`) lists starting at column 0;
//!   consecutive items of the same kind share one list even across blank lines
//! - every other non-blank line becomes its own paragraph
//!
//! Lines that already open a block-level HTML element (`<h2>`, `<ul>`, `<blockquote>`,
//! `<pre>`, `<img ...>`) are passed through untouched. Links, code fences, tables and
//! nested lists are not recognised and come out as escaped literal text.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::adapter::PipeAdapter;
use crate::event::{Event, HeadingLevel, ListKind, Tag, TagEnd};

/// Tags whose opening (or closing) at the start of a line marks the line as existing HTML.
const BLOCK_HTML_TAGS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "ul",
    "ol",
    "li",
    "blockquote",
    "pre",
    "img",
];

/// Renders markdown into an HTML fragment.
pub fn render(markdown: &str) -> String {
    let mut buffer = Vec::with_capacity(markdown.len() + markdown.len() / 4);
    if let Err(err) = render_to_writer(markdown, &mut buffer) {
        log::error!("rendering markdown into memory failed: {err}");
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Streams the rendered HTML for `markdown` into `writer`.
pub fn render_to_writer<W: Write>(markdown: &str, writer: W) -> io::Result<()> {
    PipeAdapter::new(writer).drive(parse(markdown))
}

/// Parses markdown into the event stream consumed by [`crate::html_renderer::HtmlRenderer`].
pub fn parse(markdown: &str) -> impl Iterator<Item = Event<'_>> {
    let mut builder = EventBuilder::default();
    for line in markdown.lines() {
        builder.line(line);
    }
    builder.finish()
}

#[derive(Default)]
struct EventBuilder<'a> {
    events: Vec<Event<'a>>,
    open_list: Option<ListKind>,
}

impl<'a> EventBuilder<'a> {
    fn line(&mut self, line: &'a str) {
        if line.trim().is_empty() {
            // Blank lines separate blocks but do not split a list.
            return;
        }

        if let Some((kind, content)) = list_item(line) {
            if self.open_list != Some(kind) {
                self.close_list();
                self.events.push(Event::Start(Tag::List(kind)));
                self.open_list = Some(kind);
            }
            self.with_inline(Tag::Item, content);
            return;
        }

        self.close_list();

        if let Some((level, content)) = heading(line) {
            self.with_inline(Tag::Heading(level), content);
        } else if opens_block_html(line) {
            self.events.push(Event::Html(Cow::Borrowed(line)));
        } else {
            self.with_inline(Tag::Paragraph, line);
        }
    }

    fn with_inline(&mut self, tag: Tag, content: &'a str) {
        self.events.push(Event::Start(tag));
        push_strong(&mut self.events, content);
        self.events.push(Event::End(tag.to_end()));
    }

    fn close_list(&mut self) {
        if let Some(kind) = self.open_list.take() {
            self.events.push(Event::End(TagEnd::List(kind)));
        }
    }

    fn finish(mut self) -> std::vec::IntoIter<Event<'a>> {
        self.close_list();
        self.events.into_iter()
    }
}

fn heading(line: &str) -> Option<(HeadingLevel, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    let level = HeadingLevel::try_from(hashes).ok()?;
    let content = line[hashes..].strip_prefix(' ')?;
    Some((level, content.trim_end()))
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    for marker in ["- ", "* ", "+ "] {
        if let Some(content) = line.strip_prefix(marker) {
            return Some((ListKind::Unordered, content.trim_end()));
        }
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..]
        .strip_prefix(". ")
        .map(|content| (ListKind::Ordered, content.trim_end()))
}

fn opens_block_html(line: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix('<') else {
        return false;
    };
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    BLOCK_HTML_TAGS.iter().any(|tag| {
        rest.get(..tag.len())
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            && rest[tag.len()..]
                .chars()
                .next()
                .is_none_or(|c| c == '>' || c == '/' || c.is_whitespace())
    })
}

/// Splits `text` on `**...**` pairs; everything else goes through [`push_emphasis`].
fn push_strong<'a>(events: &mut Vec<Event<'a>>, text: &'a str) {
    let mut rest = text;

    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**").filter(|&close| close > 0) else {
            break;
        };

        push_emphasis(events, &rest[..open]);
        events.push(Event::Start(Tag::Strong));
        push_emphasis(events, &after_open[..close]);
        events.push(Event::End(TagEnd::Strong));
        rest = &after_open[close + 2..];
    }

    push_emphasis(events, rest);
}

/// Splits `text` on non-empty `*...*` pairs. Unpaired asterisks stay literal.
fn push_emphasis<'a>(events: &mut Vec<Event<'a>>, text: &'a str) {
    let mut rest = text;
    let mut literal_end = 0;

    while let Some(rel_open) = rest[literal_end..].find('*') {
        let open = literal_end + rel_open;
        let after_open = &rest[open + 1..];
        match after_open.find('*') {
            Some(0) => {
                literal_end = open + 1;
            }
            Some(close) => {
                push_text(events, &rest[..open]);
                events.push(Event::Start(Tag::Emphasis));
                push_text(events, &after_open[..close]);
                events.push(Event::End(TagEnd::Emphasis));
                rest = &after_open[close + 1..];
                literal_end = 0;
            }
            None => break,
        }
    }

    push_text(events, rest);
}

fn push_text<'a>(events: &mut Vec<Event<'a>>, text: &'a str) {
    if !text.is_empty() {
        events.push(Event::Text(Cow::Borrowed(text)));
    }
}
