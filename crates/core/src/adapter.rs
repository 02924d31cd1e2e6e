use std::io::{self, Write};

use crate::event::Event;
use crate::html_renderer::HtmlRenderer;

/// A bridge that accepts an iterator of article [`Event`]s and streams
/// the resulting HTML directly to an `io::Write`.
pub struct PipeAdapter<W> {
    writer: W,
}

impl<W: Write> PipeAdapter<W> {
    /// Create a new adapter wrapping an IO writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the event iterator and drives the data into the writer.
    pub fn drive<'a, I>(self, events: I) -> io::Result<()>
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        let mut writer = HtmlRenderer::new(self.writer).render(events)?;
        writer.flush()
    }
}
