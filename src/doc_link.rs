//! Finds the incident report document linked from an issue description.
//!
//! Descriptions use Atlassian Document Format: a tree of nodes with a `type`,
//! optional `attrs`, optional `marks` and optional child `content`. The first
//! Google Docs link in depth-first, left-to-right order is taken to be the
//! report. Nodes that don't have the expected shape are skipped.

use serde_json::Value;
use std::collections::VecDeque;

pub const NO_DOC: &str = "no doc";

const GOOGLE_DOCS_PREFIX: &str = "https://docs.google.com/document";

fn is_google_doc(url: &str) -> bool {
    url.starts_with(GOOGLE_DOCS_PREFIX)
}

fn attr<'a>(node: &'a Value, name: &str) -> Option<&'a str> {
    node.get("attrs")?.get(name)?.as_str()
}

fn children<'a>(node: &'a Value, name: &str) -> impl DoubleEndedIterator<Item = &'a Value> + 'a {
    node.get(name)
        .and_then(Value::as_array)
        .map(|items| items.iter())
        .unwrap_or_default()
}

fn link_in_node(node: &Value) -> Option<&str> {
    match node.get("type").and_then(Value::as_str) {
        Some("inlineCard") => attr(node, "url").filter(|url| is_google_doc(url)),
        Some("text") => children(node, "marks")
            .filter(|mark| mark.get("type").and_then(Value::as_str) == Some("link"))
            .filter_map(|mark| attr(mark, "href"))
            .find(|href| is_google_doc(href)),
        _ => None,
    }
}

/// Returns the first Google Docs link in the description tree, if any.
pub fn find_doc_link(description: Option<&Value>) -> Option<&str> {
    let mut queue: VecDeque<&Value> = description
        .map(|description| children(description, "content").collect())
        .unwrap_or_default();

    while let Some(node) = queue.pop_front() {
        if let Some(url) = link_in_node(node) {
            return Some(url);
        }
        for child in children(node, "content").rev() {
            queue.push_front(child);
        }
    }

    None
}

/// Like [`find_doc_link`], with the `"no doc"` sentinel when nothing matches.
pub fn extract_report_url(description: Option<&Value>) -> String {
    find_doc_link(description).unwrap_or(NO_DOC).to_string()
}
