mod node;
mod selector;

pub use node::Element;
pub use selector::{Selector, SelectorError};

/// Find an element by ID in an unattached tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in &root.children {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}
