//! The DOM capability contract required of a host document model.
//!
//! `Evaluator` never touches a concrete HTML/XML tree. It is generic over
//! `Element`, a read-only view a host provides. Fetching the bytes,
//! decoding them, tokenizing HTML and building the tree are all external
//! collaborators — this trait is the only seam between them and the
//! selector engine.

/// A read-only handle to one node of a host document tree.
///
/// Implementors decide case-folding for tag/attribute names (HTML vs XML
/// mode) — `Evaluator` only ever compares the raw strings it was given at
/// parse time, so the comparison semantics live entirely on this trait's
/// impl, not in the parser.
pub trait Element: Clone + PartialEq {
    /// Lowercase or as-authored tag name, host's choice.
    fn tag_name(&self) -> String;
    fn id(&self) -> Option<String>;
    fn classes(&self) -> Vec<String>;
    fn attr(&self, name: &str) -> Option<String>;
    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }
    /// Every attribute name present on this element, for prefix-of-name
    /// tests like `[^data-]` that can't be answered by `attr`/`has_attr`
    /// alone (those only test a known, complete name).
    fn attr_names(&self) -> Vec<String>;
    /// Text of this node only, not its descendants.
    fn own_text(&self) -> String;
    /// Text of this node and every descendant, concatenated in document order.
    fn all_text(&self) -> String;

    fn parent(&self) -> Option<Self>;
    fn children(&self) -> Vec<Self>;
    /// Every descendant in depth-first document order, not including self.
    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        for child in self.children() {
            out.push(child.clone());
            out.extend(child.descendants());
        }
        out
    }
    /// Siblings appearing strictly before self, in document order.
    fn siblings_before(&self) -> Vec<Self>;
    fn previous_sibling(&self) -> Option<Self> {
        self.siblings_before().pop()
    }

    /// True if this is the root element of its document (CSS `:root`, not
    /// necessarily the evaluation root — see `Evaluator::Root`).
    fn is_root(&self) -> bool;

    /// 1-based position among all element siblings.
    fn sibling_index(&self) -> usize;
    /// 1-based position counting only siblings sharing this tag name.
    fn sibling_index_of_type(&self) -> usize;
    /// 1-based position counting from the last sibling.
    fn sibling_index_from_end(&self) -> usize;
    /// 1-based position from the end, counting only siblings of this tag name.
    fn sibling_index_of_type_from_end(&self) -> usize;
}
