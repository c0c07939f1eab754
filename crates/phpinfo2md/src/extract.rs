use std::sync::LazyLock;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, RcDom};
use regex::Regex;
use tracing::{debug, trace, warn};

use crate::block::{Block, HeadingLevel, Row, Table};
use crate::dom;
use crate::error::{ConvertError, ConvertResult};
use crate::sanitize::{br_to_newline, sanitize_cell};

const ROOT_CLASS: &str = "center";
const TITLE_CLASS: &str = "p";
const HEADER_ROW_CLASS: &str = "h";
const VALUE_ROW_CLASS: &str = "v";

const CREDITS_HEADING: &str = "PHP Credits";
const LICENSE_HEADING: &str = "PHP License";

const NO_VALUE_MARKUP: &str = "<i>no value</i>";
const NO_VALUE_MARKDOWN: &str = "*no value*";

static LINK_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b[^>]*>.*?</a>").expect("link pattern compiles"));

/// Parses a saved phpinfo() page into content blocks in document order.
///
/// Returns [`ConvertError::EmptyInput`] when `input` has no bytes. A page
/// without a `div.center` container yields an empty list.
pub fn extract_blocks(input: &[u8]) -> ConvertResult<Vec<Block>> {
    if input.is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let mut reader = input;
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut reader)?;

    let children = content_children(&dom.document);
    let Some((first, rest)) = children.split_first() else {
        debug!("no content container found");
        return Ok(Vec::new());
    };

    let mut blocks = vec![title_block(&first.node)];
    for child in rest {
        blocks.extend(classify(&child.node, child.previous.as_ref())?);
    }

    Ok(blocks)
}

/// A content container child and the sibling element right before it in the
/// same container.
struct ContentChild {
    node: Handle,
    previous: Option<Handle>,
}

fn is_container(node: &Handle) -> bool {
    dom::is_element(node, "div") && dom::has_class(node, ROOT_CLASS)
}

fn is_separator(node: &Handle) -> bool {
    dom::is_element(node, "br") || dom::is_element(node, "hr")
}

/// Element children of every content container in document order, minus
/// decorative `br`/`hr`. A node is listed once even when containers nest.
fn content_children(document: &Handle) -> Vec<ContentChild> {
    let mut found = Vec::new();
    let mut stack: Vec<(Handle, Option<Option<Handle>>)> = vec![(document.clone(), None)];

    while let Some((node, content)) = stack.pop() {
        if let Some(previous) = content {
            found.push(ContentChild {
                node: node.clone(),
                previous,
            });
        }

        let children = node.children.borrow().clone();
        if is_container(&node) {
            let mut previous = None;
            let mut marked = Vec::with_capacity(children.len());
            for child in children {
                if dom::tag_name(&child).is_none() || is_separator(&child) {
                    marked.push((child, None));
                } else {
                    let before = previous.replace(child.clone());
                    marked.push((child, Some(before)));
                }
            }
            stack.extend(marked.into_iter().rev());
        } else {
            stack.extend(children.into_iter().rev().map(|child| (child, None)));
        }
    }

    found
}

fn title_block(node: &Handle) -> Block {
    let title = dom::find_first(node, &|candidate: &Handle| {
        dom::is_element(candidate, "h1") && dom::has_class(candidate, TITLE_CLASS)
    })
    .map(|heading| dom::text_content(&heading))
    .unwrap_or_default();

    Block::heading(HeadingLevel::Title, title.trim())
}

/// Classifies one container child given the sibling right before it.
///
/// A node whose text is exactly the Credits heading is dropped on its own;
/// the siblings after it are still classified.
pub(crate) fn classify(node: &Handle, previous: Option<&Handle>) -> ConvertResult<Vec<Block>> {
    let text = dom::text_content(node);
    let text = text.trim();

    if text == CREDITS_HEADING {
        debug!("skipping credits heading");
        return Ok(Vec::new());
    }

    let blocks = match dom::tag_name(node) {
        Some("h1") => vec![Block::heading(HeadingLevel::Section, text)],
        Some("h2") => vec![Block::heading(HeadingLevel::Subsection, text)],
        Some("table") => classify_table(node, previous)?,
        other => {
            trace!(tag = ?other, "ignoring element");
            Vec::new()
        }
    };

    trace!(count = blocks.len(), "classified element");
    Ok(blocks)
}

fn classify_table(table: &Handle, previous: Option<&Handle>) -> ConvertResult<Vec<Block>> {
    if previous.is_some_and(|heading| dom::text_content(heading) == LICENSE_HEADING) {
        return Ok(license_paragraphs(table));
    }

    let rows = dom::table_rows(table);
    if rows.iter().any(|row| dom::has_class(row, VALUE_ROW_CLASS)) {
        return Ok(vec![free_text(&rows)?]);
    }

    Ok(parse_table(&rows)?.map(Block::Table).into_iter().collect())
}

fn license_paragraphs(table: &Handle) -> Vec<Block> {
    dom::descendants(table, |node| dom::is_element(node, "p"))
        .iter()
        .map(|paragraph| Block::paragraph(dom::text_content(paragraph).trim()))
        .collect()
}

fn free_text(rows: &[Handle]) -> ConvertResult<Block> {
    let cell = rows
        .iter()
        .filter(|row| dom::has_class(row, VALUE_ROW_CLASS))
        .find_map(|row| dom::find_first(row, &|node: &Handle| dom::is_element(node, "td")));

    let markup = match cell {
        Some(cell) => dom::inner_html(&cell)?,
        None => String::new(),
    };
    let without_links = LINK_ELEMENT.replace_all(&markup, "");

    Ok(Block::paragraph(&br_to_newline(&without_links)))
}

/// Splits rows into head and body. Header rows only count while no body row
/// has been seen; afterwards every row lands in the body.
pub(crate) fn parse_table(rows: &[Handle]) -> ConvertResult<Option<Table>> {
    let mut table = Table::default();

    for row in rows {
        let cells = dom::element_children(row)
            .iter()
            .map(table_cell)
            .collect::<ConvertResult<Row>>()?;

        if cells.is_empty() {
            continue;
        }

        if table.body.is_empty() && dom::has_class(row, HEADER_ROW_CLASS) {
            table.head.push(cells);
        } else {
            table.body.push(cells);
        }
    }

    if table.is_empty() {
        warn!(rows = rows.len(), "dropping table without cells");
        return Ok(None);
    }

    Ok(Some(table))
}

fn table_cell(cell: &Handle) -> ConvertResult<String> {
    if dom::inner_html(cell)?.trim() == NO_VALUE_MARKUP {
        return Ok(NO_VALUE_MARKDOWN.to_string());
    }
    Ok(sanitize_cell(&dom::text_content(cell)))
}
