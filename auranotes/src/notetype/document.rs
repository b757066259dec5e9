use crate::NoteType;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A rich-text document tree as produced by the editor.
///
/// The tree is kept verbatim. Text leaves are objects carrying a string `text`
/// field; everything else (node types, marks, attributes) is ignored when the
/// plain text is extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Default for Document {
    fn default() -> Self {
        Document(json!({"type": "doc", "content": []}))
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Document(value)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::paragraphs(text)
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Value {
        document.0
    }
}

impl Document {
    /// A document with one paragraph per line of `text`.
    pub fn paragraphs(text: &str) -> Self {
        let content: Vec<Value> = text
            .lines()
            .map(|line| {
                if line.is_empty() {
                    json!({"type": "paragraph"})
                } else {
                    json!({
                        "type": "paragraph",
                        "content": [{"type": "text", "text": line}]
                    })
                }
            })
            .collect();
        Document(json!({"type": "doc", "content": content}))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

fn collect_text<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::Object(map) => collect_text_object(map, out),
        Value::Array(items) => {
            for item in items {
                collect_text(item, out);
            }
        }
        // Older records stored the body as a bare string
        Value::String(s) => out.push(s),
        _ => {}
    }
}

fn collect_text_object<'a>(map: &'a Map<String, Value>, out: &mut Vec<&'a str>) {
    if let Some(Value::String(text)) = map.get("text") {
        out.push(text);
    }
    if let Some(children) = map.get("content") {
        collect_text(children, out);
    }
}

impl NoteType for Document {
    fn plain_text(&self) -> String {
        let mut leaves = Vec::new();
        collect_text(&self.0, &mut leaves);
        leaves
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
