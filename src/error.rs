use thiserror::Error;

/// Errors surfaced by the prediction pipeline.
///
/// Malformed FEN sub-fields and malformed UCI strings are not represented
/// here; those degrade to documented defaults instead of failing, since the
/// pipeline sits downstream of a rules engine that supplies well-formed
/// positions and moves.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The vocabulary file did not contain the expected number of moves.
    #[error("move vocabulary holds {found} moves, expected {expected}")]
    VocabularyMismatch { expected: usize, found: usize },

    /// The vocabulary file could not be read.
    #[error("failed to read move vocabulary: {0}")]
    VocabularyIo(#[from] std::io::Error),

    /// The model call did not return a usable output. Not retried internally.
    #[error("model inference failed: {0}")]
    InferenceFailed(String),

    /// Every legal move fell outside vocabulary coverage, leaving nothing
    /// to choose from. Callers should fall back to another move source.
    #[error("no legal move is covered by the move vocabulary")]
    NoLegalMovesScored,
}
