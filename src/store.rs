//! Process-wide translation data.
//!
//! Readers take one [`TranslationSnapshot`] per request with
//! [`TranslationStore::snapshot`] and never observe a half-applied reload:
//! a reload builds a complete snapshot and swaps it in atomically.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::dictionary::TranslationTree;

/// Loaded dictionary together with the language it was loaded for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSnapshot {
    pub tree: TranslationTree,
    pub language_code: String,
}

impl TranslationSnapshot {
    #[must_use]
    pub fn new(tree: TranslationTree, language_code: impl Into<String>) -> Self {
        Self { tree, language_code: language_code.into() }
    }
}

/// Wait-free readable, atomically replaceable snapshot holder.
#[derive(Debug)]
pub struct TranslationStore {
    inner: ArcSwap<TranslationSnapshot>,
}

impl Default for TranslationStore {
    fn default() -> Self {
        Self::new(TranslationSnapshot::default())
    }
}

impl TranslationStore {
    #[must_use]
    pub fn new(snapshot: TranslationSnapshot) -> Self {
        Self { inner: ArcSwap::from_pointee(snapshot) }
    }

    /// Current snapshot. Holding the `Arc` keeps it alive across a reload.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TranslationSnapshot> {
        self.inner.load_full()
    }

    /// Replaces the whole snapshot.
    pub fn replace(&self, snapshot: TranslationSnapshot) {
        tracing::debug!(
            language = %snapshot.language_code,
            entries = snapshot.tree.len(),
            "Replacing translation snapshot"
        );
        self.inner.store(Arc::new(snapshot));
    }

    /// Language of the current snapshot.
    #[must_use]
    pub fn language_code(&self) -> String {
        self.inner.load().language_code.clone()
    }
}
