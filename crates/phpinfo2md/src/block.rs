use crate::sanitize::sanitize_cell;

/// Cells of a single table row, in column order.
pub type Row = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// The page title, rendered as `#`.
    Title,
    /// A module or top-level section, rendered as `##`.
    Section,
    /// A nested section, rendered as `###`.
    Subsection,
}

impl HeadingLevel {
    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::Title => 1,
            HeadingLevel::Section => 2,
            HeadingLevel::Subsection => 3,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            HeadingLevel::Title => "#",
            HeadingLevel::Section => "##",
            HeadingLevel::Subsection => "###",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub head: Vec<Row>,
    pub body: Vec<Row>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.body.is_empty()
    }

    /// Width of the table, taken from the first head row, or the first body
    /// row when there is no head.
    pub fn column_count(&self) -> usize {
        self.head
            .first()
            .or_else(|| self.body.first())
            .map(Vec::len)
            .unwrap_or(0)
    }
}

/// A unit of classified page content in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: HeadingLevel, text: String },
    Paragraph(String),
    Table(Table),
}

impl Block {
    pub fn heading(level: HeadingLevel, raw: &str) -> Self {
        Block::Heading {
            level,
            text: sanitize_cell(raw),
        }
    }

    pub fn paragraph(raw: &str) -> Self {
        Block::Paragraph(sanitize_cell(raw))
    }

    /// Blocks without data render to nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            Block::Heading { text, .. } => text.is_empty(),
            Block::Paragraph(text) => text.is_empty(),
            Block::Table(table) => table.is_empty(),
        }
    }
}
