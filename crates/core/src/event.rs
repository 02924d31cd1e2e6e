use std::borrow::Cow;
use std::convert::TryFrom;

/// A block or inline event emitted by the article markdown parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// Start of a tagged element.
    Start(Tag),
    /// End of a tagged element.
    End(TagEnd),
    /// Text node, escaped on output.
    Text(Cow<'a, str>),
    /// A source line that already opens a block-level HTML element; written verbatim.
    Html(Cow<'a, str>),
}

/// Tags for container elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Paragraph,
    Heading(HeadingLevel),
    List(ListKind),
    Item,
    Emphasis,
    Strong,
}

/// Tag terminators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEnd {
    Paragraph,
    Heading(HeadingLevel),
    List(ListKind),
    Item,
    Emphasis,
    Strong,
}

/// Heading depth. Only ATX levels 1 through 4 are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1 = 1,
    H2,
    H3,
    H4,
}

/// The two single-level list flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    pub(crate) fn tag_name(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

impl Tag {
    /// Converts a tag into its closing counterpart.
    pub fn to_end(&self) -> TagEnd {
        match *self {
            Tag::Paragraph => TagEnd::Paragraph,
            Tag::Heading(level) => TagEnd::Heading(level),
            Tag::List(kind) => TagEnd::List(kind),
            Tag::Item => TagEnd::Item,
            Tag::Emphasis => TagEnd::Emphasis,
            Tag::Strong => TagEnd::Strong,
        }
    }

    /// Block tags start on their own line in the rendered output.
    pub fn is_block(&self) -> bool {
        matches!(self, Tag::Paragraph | Tag::Heading(_) | Tag::List(_))
    }
}

impl TryFrom<usize> for HeadingLevel {
    type Error = ();

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HeadingLevel::H1),
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            4 => Ok(HeadingLevel::H4),
            _ => Err(()),
        }
    }
}
