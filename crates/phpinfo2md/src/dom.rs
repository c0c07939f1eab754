use std::io;

use html5ever::serialize::{serialize, SerializeOpts};
use markup5ever_rcdom::{Handle, NodeData, SerializableHandle};

pub(crate) fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

pub(crate) fn is_element(node: &Handle, tag: &str) -> bool {
    tag_name(node) == Some(tag)
}

pub(crate) fn has_class(node: &Handle, class: &str) -> bool {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs.borrow().iter().any(|attr| {
            attr.name.local.as_ref() == "class"
                && attr.value.split_ascii_whitespace().any(|value| value == class)
        }),
        _ => false,
    }
}

pub(crate) fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

/// Rows of a table. The parser inserts an implicit `tbody`, so rows nested in
/// section wrappers count as direct rows.
pub(crate) fn table_rows(table: &Handle) -> Vec<Handle> {
    let mut rows = Vec::new();
    for child in element_children(table) {
        if is_element(&child, "tr") {
            rows.push(child);
        } else if ["thead", "tbody", "tfoot"]
            .iter()
            .any(|section| is_element(&child, section))
        {
            rows.extend(
                element_children(&child)
                    .into_iter()
                    .filter(|row| is_element(row, "tr")),
            );
        }
    }
    rows
}

/// Preorder walk over the descendants of `node`, excluding `node` itself.
/// Stops as soon as `visit` returns `false`. Iterative: nesting depth is
/// bounded only by the parser.
fn walk<F>(node: &Handle, mut visit: F)
where
    F: FnMut(&Handle) -> bool,
{
    let mut stack: Vec<Handle> = node.children.borrow().iter().rev().cloned().collect();
    while let Some(current) = stack.pop() {
        if !visit(&current) {
            return;
        }
        stack.extend(current.children.borrow().iter().rev().cloned());
    }
}

/// All descendants of `node` matching `predicate`, in document order.
pub(crate) fn descendants<F>(node: &Handle, predicate: F) -> Vec<Handle>
where
    F: Fn(&Handle) -> bool,
{
    let mut found = Vec::new();
    walk(node, |current| {
        if predicate(current) {
            found.push(current.clone());
        }
        true
    });
    found
}

pub(crate) fn find_first<F>(node: &Handle, predicate: &F) -> Option<Handle>
where
    F: Fn(&Handle) -> bool,
{
    let mut found = None;
    walk(node, |current| {
        if predicate(current) {
            found = Some(current.clone());
        }
        found.is_none()
    });
    found
}

/// Concatenated text of every text node beneath `node`.
pub(crate) fn text_content(node: &Handle) -> String {
    let mut output = String::new();
    if let NodeData::Text { contents } = &node.data {
        output.push_str(&contents.borrow());
    }
    walk(node, |current| {
        if let NodeData::Text { contents } = &current.data {
            output.push_str(&contents.borrow());
        }
        true
    });
    output
}

/// Serialized markup of the children of `node`.
pub(crate) fn inner_html(node: &Handle) -> io::Result<String> {
    let mut buffer = Vec::new();
    let handle = SerializableHandle::from(node.clone());
    serialize(&mut buffer, &handle, SerializeOpts::default())?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
