//! Human-readable views of the registry: console text and an HTML page.

use crate::namespace::Namespace;
use crate::registry::Registry;
use crate::state::{self, StateValue};

const TEXT_OPEN_CHARS: [char; 4] = [' ', '[', '!', '$'];

const HTML_HEAD: &str = "<!doctype html>
<html>
<head><style>
body { background : #ffffff; }
table { border : 1px solid #000000; margin-bottom: 10px; }
td { font-family : calibri, sans-serif; font-size : 11px; font-weight : bold; width : 30px; height: 30px; text-align : center; }
.got { border : 1px solid #000000; }
.ungot { border : 1px solid #ffffff; }
.seen { background-color : #f8f; }
.unseen { }
.complete { border : 1px solid #000000; }
.uncomplete { border : 1px dotted #000000; }
.namespace { font-size : 1.4em; }
</style>
</head>
<body>
";

const HTML_TAIL: &str = "</body>\n</html>\n";

/// Namespaces that have something to show, with their render length.
fn rendered(registry: &Registry) -> impl Iterator<Item = (&str, &Namespace, u32)> {
    registry
        .namespaces
        .iter()
        .filter_map(|(name, namespace)| {
            namespace
                .render_length()
                .map(|length| (name, namespace, length))
        })
}

/// Console lines for the `text` command, one line per chunk.
pub fn text_lines(registry: &Registry) -> Vec<String> {
    let chunk = registry.chunk_size();
    let mut lines = Vec::new();

    for (name, namespace, length) in rendered(registry) {
        if !name.is_empty() {
            match registry.namespaces.linked_dir(name) {
                Some(subdir) => lines.push(format!("{} ({}):", name, subdir.display())),
                None => lines.push(format!("{}:", name)),
            }
        }

        let width = state::digit_width(length);
        let complete = namespace.is_complete();
        let mut line = String::new();
        for index in 1..=length {
            line.push_str(&text_cell(index, namespace.state(index), width));
            if index == length || index % chunk == 0 {
                if Some(index) == namespace.max() {
                    line.push_str(if complete { " ##" } else { " ++" });
                }
                lines.push(std::mem::take(&mut line));
            } else {
                line.push(' ');
            }
        }
        lines.push(String::new());
    }

    lines
}

/// HTML page for the `html` command; `None` when no namespace has content.
pub fn html_document(registry: &Registry) -> Option<String> {
    let chunk = registry.chunk_size();
    let mut body = String::new();

    for (name, namespace, length) in rendered(registry) {
        let width = state::digit_width(length);
        let class = if namespace.max().is_some() {
            "complete"
        } else {
            "uncomplete"
        };
        body.push_str(&format!("<table class=\"{}\">\n", class));
        if !name.is_empty() {
            body.push_str(&format!(
                "<tr><td class=\"namespace\" colspan=\"{}\">{}</td></tr>\n",
                chunk,
                escape(name)
            ));
        }
        for index in 1..=length {
            if (index - 1) % chunk == 0 {
                body.push_str("<tr>");
            }
            let item = namespace.state(index);
            body.push_str(&format!(
                "<td class=\"{} {}\">{:0width$}</td>",
                if item.obtained() { "got" } else { "ungot" },
                if item.reviewed() { "seen" } else { "unseen" },
                index,
                width = width
            ));
            if index == length || index % chunk == 0 {
                body.push_str("</tr>\n");
            }
        }
        body.push_str("</table>\n");
    }

    if body.is_empty() {
        return None;
    }
    Some(format!("{}{}{}", HTML_HEAD, body, HTML_TAIL))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Cell text for one state, as shown by the text report.
pub fn text_cell(index: u32, item: StateValue, width: usize) -> String {
    let open = TEXT_OPEN_CHARS[item.bits() as usize];
    let close = if open == '[' { ']' } else { open };
    format!("{}{:0width$}{}", open, index, close, width = width)
}
