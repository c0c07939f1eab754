use tracing::warn;

use crate::block::{Block, Row, Table};

/// Appended to the document so renderers hide padding cells.
pub const HIDE_EMPTY_CELLS_STYLE: &str = "<style>th:empty,td:empty{display: none}</style>\n";

/// Serializes blocks as Markdown. Blank blocks produce no output.
pub fn render_markdown(blocks: &[Block]) -> String {
    let mut markdown = String::new();
    for block in blocks {
        render_block(block, &mut markdown);
    }
    markdown
}

fn render_block(block: &Block, output: &mut String) {
    if block.is_blank() {
        return;
    }

    match block {
        Block::Heading { level, text } => {
            output.push_str(level.marker());
            output.push(' ');
            output.push_str(text);
            output.push_str("\n\n");
        }
        Block::Paragraph(text) => {
            output.push_str(text);
            output.push_str("\n\n");
        }
        Block::Table(table) => render_table(table, output),
    }
}

fn render_table(table: &Table, output: &mut String) {
    let columns = table.column_count();
    if columns == 0 {
        warn!(?table, "skipping table without columns");
        return;
    }

    for (index, row) in table.head.iter().enumerate() {
        if index == 0 {
            push_row(output, row.iter().cloned());
            push_separator(output, columns);
        } else {
            push_row(output, row.iter().map(|cell| bold(cell)));
        }
    }

    if table.head.is_empty() {
        output.push_str(&"|".repeat(columns + 1));
        output.push('\n');
        push_separator(output, columns);
    }

    for row in &table.body {
        push_row(output, labelled(row));
    }

    output.push('\n');
}

/// Body rows carry their label in the first cell.
fn labelled(row: &Row) -> impl Iterator<Item = String> + '_ {
    row.iter()
        .enumerate()
        .map(|(index, cell)| if index == 0 { bold(cell) } else { cell.clone() })
}

fn bold(cell: &str) -> String {
    format!("**{cell}**")
}

fn push_row(output: &mut String, cells: impl Iterator<Item = String>) {
    let cells: Vec<String> = cells.collect();
    output.push_str("| ");
    output.push_str(&cells.join(" | "));
    output.push_str(" |\n");
}

fn push_separator(output: &mut String, columns: usize) {
    push_row(output, std::iter::repeat("---".to_string()).take(columns));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::HeadingLevel;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn renders_headings_and_paragraphs() {
        let blocks = vec![
            Block::heading(HeadingLevel::Title, "PHP Version 8.1.0"),
            Block::heading(HeadingLevel::Section, "Configuration"),
            Block::heading(HeadingLevel::Subsection, "Core"),
            Block::paragraph("Zend Engine v4.1.0"),
        ];
        assert_eq!(
            render_markdown(&blocks),
            "# PHP Version 8.1.0\n\n## Configuration\n\n### Core\n\nZend Engine v4.1.0\n\n"
        );
    }

    #[test]
    fn skips_blank_blocks() {
        let blocks = vec![
            Block::heading(HeadingLevel::Title, ""),
            Block::Paragraph(String::new()),
            Block::Table(Table::default()),
        ];
        assert_eq!(render_markdown(&blocks), "");
    }

    #[test]
    fn renders_directive_table() {
        let table = Table {
            head: vec![row(&["Directive", "Local Value", "Master Value"])],
            body: vec![row(&["display_errors", "On", "On"])],
        };
        assert_eq!(
            render_markdown(&[Block::Table(table)]),
            "| Directive | Local Value | Master Value |\n\
             | --- | --- | --- |\n\
             | **display_errors** | On | On |\n\
             \n"
        );
    }

    #[test]
    fn bolds_secondary_header_rows() {
        let table = Table {
            head: vec![row(&["Module", "Version"]), row(&["Name", "Value"])],
            body: vec![row(&["date", "8.1.0"])],
        };
        assert_eq!(
            render_markdown(&[Block::Table(table)]),
            "| Module | Version |\n\
             | --- | --- |\n\
             | **Name** | **Value** |\n\
             | **date** | 8.1.0 |\n\
             \n"
        );
    }

    #[test]
    fn headless_table_gets_invisible_header() {
        let table = Table {
            head: Vec::new(),
            body: vec![row(&["System", "Linux"]), row(&["Build Date", "Nov 25 2021"])],
        };
        assert_eq!(
            render_markdown(&[Block::Table(table)]),
            "|||\n\
             | --- | --- |\n\
             | **System** | Linux |\n\
             | **Build Date** | Nov 25 2021 |\n\
             \n"
        );
    }

    #[test]
    fn table_line_count_matches_rows() {
        for head_rows in 1..4 {
            for body_rows in 0..4 {
                let table = Table {
                    head: (0..head_rows).map(|_| row(&["h1", "h2"])).collect(),
                    body: (0..body_rows).map(|_| row(&["b1", "b2"])).collect(),
                };
                let markdown = render_markdown(&[Block::Table(table)]);
                let lines: Vec<&str> = markdown.split_terminator('\n').collect();
                assert_eq!(lines.len(), head_rows + body_rows + 2);
                assert_eq!(lines.last(), Some(&""));
                assert!(lines[..lines.len() - 1]
                    .iter()
                    .all(|line| line.matches(" | ").count() == 1));
            }
        }
    }

    #[test]
    fn headless_table_line_count_matches_rows() {
        for body_rows in 1..4 {
            let table = Table {
                head: Vec::new(),
                body: (0..body_rows).map(|_| row(&["b1", "b2"])).collect(),
            };
            let markdown = render_markdown(&[Block::Table(table)]);
            let lines: Vec<&str> = markdown.split_terminator('\n').collect();
            assert_eq!(lines.len(), body_rows + 3);
            assert_eq!(lines[0], "|||");
            assert_eq!(lines[1], "| --- | --- |");
            assert_eq!(lines.last(), Some(&""));
            assert!(lines[2..lines.len() - 1]
                .iter()
                .all(|line| line.starts_with("| **b1** |")));
        }
    }
}
