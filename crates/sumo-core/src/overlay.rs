//! Overlays and the ordered overlay chain
//!
//! An overlay is one layer of component definitions. The chain is a plain
//! ordered list: the parent of an overlay is the entry before it, and an
//! overlay only ever reads the components of its parent.

use crate::model::ComponentSet;
use crate::{Error, Result};
use sumo_fs::NormalizedPath;

/// One resolved layer of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub name: String,
    pub path: NormalizedPath,
    /// Components after merging with the parent overlay.
    pub components: ComponentSet,
}

impl Overlay {
    pub fn new(name: impl Into<String>, path: NormalizedPath) -> Self {
        Self {
            name: name.into(),
            path,
            components: ComponentSet::default(),
        }
    }
}

/// Overlays in resolution order, most general first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayChain {
    overlays: Vec<Overlay>,
}

impl OverlayChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.overlays.iter().position(|o| o.name == name)
    }

    /// Look up an overlay by name.
    pub fn get(&self, name: &str) -> Result<&Overlay> {
        self.overlays
            .iter()
            .find(|o| o.name == name)
            .ok_or_else(|| Error::UnknownOverlay { name: name.into() })
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Overlay> {
        self.overlays
            .iter_mut()
            .find(|o| o.name == name)
            .ok_or_else(|| Error::UnknownOverlay { name: name.into() })
    }

    pub fn parent_of(&self, index: usize) -> Option<&Overlay> {
        index.checked_sub(1).and_then(|i| self.overlays.get(i))
    }

    pub fn child_of(&self, index: usize) -> Option<&Overlay> {
        self.overlays.get(index + 1)
    }

    /// The most specific overlay of the chain.
    pub fn last(&self) -> Option<&Overlay> {
        self.overlays.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.overlays.iter().map(|o| o.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> OverlayChain {
        let mut chain = OverlayChain::new();
        for name in ["base", "middle", "final"] {
            chain.push(Overlay::new(name, NormalizedPath::new(name)));
        }
        chain
    }

    #[test]
    fn parent_and_child_follow_position() {
        let chain = chain();
        let middle = chain.position("middle").unwrap();

        assert_eq!(chain.parent_of(middle).unwrap().name, "base");
        assert_eq!(chain.child_of(middle).unwrap().name, "final");
        assert!(chain.parent_of(0).is_none());
        assert!(chain.child_of(2).is_none());
    }

    #[test]
    fn unknown_overlay_is_an_error() {
        let chain = chain();
        let err = chain.get("staging").unwrap_err();
        assert!(matches!(err, Error::UnknownOverlay { name } if name == "staging"));
    }

    #[test]
    fn names_keep_order() {
        assert_eq!(chain().names(), vec!["base", "middle", "final"]);
    }
}
