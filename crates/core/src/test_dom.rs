//! A minimal in-memory tree implementing `Element`, used only by this
//! crate's own unit tests. Not part of the public API.

use crate::dom::Element;
use std::rc::Rc;

struct NodeData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

struct Arena {
    nodes: Vec<NodeData>,
    root: usize,
}

#[derive(Clone)]
pub struct TestElement {
    arena: Rc<Arena>,
    id: usize,
}

impl PartialEq for TestElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena) && self.id == other.id
    }
}

/// Builds a tree from a simple nested description and returns its root.
pub struct Builder {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Builder>,
}

pub fn el(tag: &str, children: Vec<Builder>) -> Builder {
    Builder {
        tag: tag.to_string(),
        attrs: vec![],
        text: String::new(),
        children,
    }
}

pub fn leaf(tag: &str) -> Builder {
    el(tag, vec![])
}

impl Builder {
    pub fn with_id(mut self, id: &str) -> Self {
        self.attrs.push(("id".to_string(), id.to_string()));
        self
    }
    pub fn with_class(mut self, class: &str) -> Self {
        self.attrs.push(("class".to_string(), class.to_string()));
        self
    }
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.push((key.to_string(), value.to_string()));
        self
    }
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn build(self) -> TestElement {
        let mut nodes = Vec::new();
        let root = push(&mut nodes, self, None);
        TestElement {
            arena: Rc::new(Arena { nodes, root }),
            id: root,
        }
    }
}

fn push(nodes: &mut Vec<NodeData>, b: Builder, parent: Option<usize>) -> usize {
    let id = None;
    let classes = b
        .attrs
        .iter()
        .filter(|(k, _)| k == "class")
        .map(|(_, v)| v.clone())
        .collect();
    let idv = b
        .attrs
        .iter()
        .find(|(k, _)| k == "id")
        .map(|(_, v)| v.clone())
        .or(id);
    let attrs: Vec<_> = b.attrs.iter().filter(|(k, _)| k != "class").cloned().collect();
    let my_index = nodes.len();
    nodes.push(NodeData {
        tag: b.tag,
        id: idv,
        classes,
        attrs,
        text: b.text,
        parent,
        children: vec![],
    });
    let mut child_ids = Vec::new();
    for child in b.children {
        child_ids.push(push(nodes, child, Some(my_index)));
    }
    nodes[my_index].children = child_ids;
    my_index
}

impl TestElement {
    fn data(&self) -> &NodeData {
        &self.arena.nodes[self.id]
    }
    fn with_id_node(&self, id: usize) -> Self {
        TestElement {
            arena: self.arena.clone(),
            id,
        }
    }
}

impl Element for TestElement {
    fn tag_name(&self) -> String {
        self.data().tag.clone()
    }
    fn id(&self) -> Option<String> {
        self.data().id.clone()
    }
    fn classes(&self) -> Vec<String> {
        self.data().classes.clone()
    }
    fn attr(&self, name: &str) -> Option<String> {
        self
            .data()
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }
    fn attr_names(&self) -> Vec<String> {
        self.data().attrs.iter().map(|(k, _)| k.clone()).collect()
    }
    fn own_text(&self) -> String {
        self.data().text.clone()
    }
    fn all_text(&self) -> String {
        let mut out = self.data().text.clone();
        for child in self.children() {
            out.push_str(&child.all_text());
        }
        out
    }
    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|p| self.with_id_node(p))
    }
    fn children(&self) -> Vec<Self> {
        self
            .data()
            .children
            .iter()
            .map(|&c| self.with_id_node(c))
            .collect()
    }
    fn siblings_before(&self) -> Vec<Self> {
        let Some(parent) = self.data().parent else {
            return vec![];
        };
        let siblings = &self.arena.nodes[parent].children;
        let my_pos = siblings.iter().position(|&c| c == self.id).unwrap();
        siblings[..my_pos]
            .iter()
            .map(|&c| self.with_id_node(c))
            .collect()
    }
    fn is_root(&self) -> bool {
        self.id == self.arena.root
    }
    fn sibling_index(&self) -> usize {
        self.siblings_before().len() + 1
    }
    fn sibling_index_of_type(&self) -> usize {
        let tag = self.tag_name();
        self
            .siblings_before()
            .iter()
            .filter(|s| s.tag_name() == tag)
            .count()
            + 1
    }
    fn sibling_index_from_end(&self) -> usize {
        let Some(parent) = self.data().parent else {
            return 1;
        };
        let siblings = &self.arena.nodes[parent].children;
        let my_pos = siblings.iter().position(|&c| c == self.id).unwrap();
        siblings.len() - my_pos
    }
    fn sibling_index_of_type_from_end(&self) -> usize {
        let tag = self.tag_name();
        let Some(parent) = self.data().parent else {
            return 1;
        };
        let siblings = &self.arena.nodes[parent].children;
        let my_pos = siblings.iter().position(|&c| c == self.id).unwrap();
        siblings[my_pos..]
            .iter()
            .filter(|&&c| self.arena.nodes[c].tag == tag)
            .count()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_and_navigates() {
        let root = el(
            "div",
            vec![leaf("p").with_text("hello"), leaf("span").with_class("x")],
        )
        .build();
        assert_eq!(root.tag_name(), "div");
        assert!(root.is_root());
        let children = root.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].tag_name(), "p");
        assert_eq!(children[0].sibling_index(), 1);
        assert_eq!(children[1].sibling_index(), 2);
        assert_eq!(children[1].classes(), vec!["x".to_string()]);
        assert_eq!(children[1].parent().unwrap(), root);
    }
}
