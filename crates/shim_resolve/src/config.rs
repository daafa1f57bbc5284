use serde::{Deserialize, Serialize};

/// What to do when an unqualified embedded reference matches no declaration
/// in its package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UnresolvedEmbeddingPolicy {
    /// The embedding contributes no methods; a warning is logged. This is
    /// the reference behaviour.
    #[default]
    Permissive,
    /// Fail the resolution with a not-found error.
    Strict,
}

/// Policy switches that drive contract resolution behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResolverConfig {
    #[serde(default)]
    pub unresolved_embedding: UnresolvedEmbeddingPolicy,
    /// When set, merging rejects two methods that share a name but disagree
    /// on signature instead of silently preferring the outer one.
    #[serde(default)]
    pub strict_conflicts: bool,
}
