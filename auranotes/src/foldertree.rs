//! Folder tree built from flat folder paths.
use crate::path;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    pub name: String,
    pub full_path: String,
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    fn new(name: &str, full_path: String) -> Self {
        FolderNode {
            name: name.to_owned(),
            full_path,
            children: Vec::new(),
        }
    }

    /// Locate the node at `full_path` in a forest.
    pub fn find<'a>(forest: &'a [FolderNode], full_path: &str) -> Option<&'a FolderNode> {
        let mut level = forest;
        let mut found = None;
        for segment in path::segments(full_path) {
            let node = level.iter().find(|n| n.name == segment)?;
            level = &node.children;
            found = Some(node);
        }
        found
    }
}

/// Build the folder forest from a set of paths.
///
/// Paths are walked in lexicographic order. Ancestors with no path of their own
/// are synthesized, and paths with the same segments end up in the same node.
pub fn build_folder_tree<S: AsRef<str>>(paths: &[S]) -> Vec<FolderNode> {
    let mut sorted: Vec<&str> = paths.iter().map(|p| p.as_ref()).collect();
    sorted.sort_unstable();

    let mut roots: Vec<FolderNode> = Vec::new();
    for p in sorted {
        let mut level = &mut roots;
        let mut full_path = String::new();
        for segment in path::segments(p) {
            full_path = path::join(&full_path, segment);
            let idx = match level.iter().position(|n| n.name == segment) {
                Some(i) => i,
                None => {
                    level.push(FolderNode::new(segment, full_path.clone()));
                    level.len() - 1
                }
            };
            level = &mut level[idx].children;
        }
    }
    roots
}
