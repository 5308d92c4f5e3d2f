//! Arena storage for node text.
//!
//! Every string a [`Tree`](crate::Tree) hands out lives in one `bumpalo`
//! arena per file, so node text can be borrowed freely by checks and
//! released all at once when the file is done.

use bumpalo::Bump;

/// Bump arena owning the text of one tree.
///
/// # Example
///
/// ```rust
/// use cstlint_ast::AstArena;
///
/// let arena = AstArena::new();
/// let text = arena.alloc_str("key.name");
/// assert_eq!(text, "key.name");
/// ```
pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    /// Creates an empty arena.
    #[inline]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Copies `s` into the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Total bytes reserved by the arena.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Frees every string at once so the arena can be reused for the next file.
    #[inline]
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}
