use std::io::{self, Write};

use crate::escape::escape_text;
use crate::event::{Event, Tag, TagEnd};

/// Writes [`Event`]s as HTML.
///
/// Blocks are separated by a single newline with no trailing newline, so a
/// one-line document renders to exactly one element.
pub struct HtmlRenderer<W: Write> {
    writer: W,
    wrote_block: bool,
}

impl<W: Write> HtmlRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            wrote_block: false,
        }
    }

    pub fn render<'a, I>(mut self, iter: I) -> io::Result<W>
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        for event in iter {
            match event {
                Event::Start(tag) => {
                    if tag.is_block() {
                        self.begin_block()?;
                    }
                    self.write_start_tag(tag)?;
                }
                Event::End(end) => self.write_end_tag(end)?,
                Event::Text(text) => {
                    self.writer.write_all(escape_text(text.as_ref()).as_bytes())?;
                }
                Event::Html(html) => {
                    self.begin_block()?;
                    self.writer.write_all(html.as_bytes())?;
                }
            }
        }

        Ok(self.writer)
    }

    fn begin_block(&mut self) -> io::Result<()> {
        if self.wrote_block {
            self.writer.write_all(b"\n")?;
        }
        self.wrote_block = true;
        Ok(())
    }

    fn write_start_tag(&mut self, tag: Tag) -> io::Result<()> {
        match tag {
            Tag::Paragraph => self.writer.write_all(b"<p>"),
            Tag::Heading(level) => write!(self.writer, "<h{}>", level as u8),
            Tag::List(kind) => write!(self.writer, "<{}>", kind.tag_name()),
            Tag::Item => self.writer.write_all(b"<li>"),
            Tag::Emphasis => self.writer.write_all(b"<em>"),
            Tag::Strong => self.writer.write_all(b"<strong>"),
        }
    }

    fn write_end_tag(&mut self, end: TagEnd) -> io::Result<()> {
        match end {
            TagEnd::Paragraph => self.writer.write_all(b"</p>"),
            TagEnd::Heading(level) => write!(self.writer, "</h{}>", level as u8),
            TagEnd::List(kind) => write!(self.writer, "</{}>", kind.tag_name()),
            TagEnd::Item => self.writer.write_all(b"</li>"),
            TagEnd::Emphasis => self.writer.write_all(b"</em>"),
            TagEnd::Strong => self.writer.write_all(b"</strong>"),
        }
    }
}
