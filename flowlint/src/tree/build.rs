//! Arena construction with parent links recorded up front.

use super::{Element, ElementId, ElementKind, Gating, Span, Tree};

/// Builder for a [`Tree`] arena. Children must be allocated before the
/// element that owns them; pushing an element records it as the parent of
/// every child its kind references.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    elements: Vec<Element>,
    parents: Vec<Option<ElementId>>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an element with default flags (physical, gating enabled).
    pub fn push(&mut self, kind: ElementKind, span: Span) -> ElementId {
        self.push_with_flags(kind, span, true, Gating::Enabled)
    }

    /// Allocates an element with explicit physical/gating flags.
    pub fn push_with_flags(
        &mut self,
        kind: ElementKind,
        span: Span,
        physical: bool,
        gating: Gating,
    ) -> ElementId {
        let id = ElementId(u32::try_from(self.elements.len()).unwrap_or(u32::MAX));
        for child in kind.children() {
            self.parents[child.index()] = Some(id);
        }
        self.elements.push(Element {
            kind,
            span,
            physical,
            gating,
        });
        self.parents.push(None);
        id
    }

    /// Finalizes the arena.
    #[must_use]
    pub fn finish(self) -> Tree {
        Tree {
            elements: self.elements,
            parents: self.parents,
        }
    }
}
