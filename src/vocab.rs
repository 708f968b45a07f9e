use std::path::Path;

use indexmap::IndexSet;

use crate::error::PredictError;

/// Number of moves in the classification head of the released models.
pub const VOCAB_SIZE: usize = 1880;

/// The fixed, ordered list of UCI move strings the model scores, and its
/// inverse index. Insertion order is the model's output-index order, so
/// reordering the file silently corrupts every score. Loaded once at
/// startup and immutable afterwards.
pub struct MoveVocabulary {
    moves: IndexSet<String>,
}

impl MoveVocabulary {
    /// Builds a vocabulary from newline-separated UCI moves.
    /// Fails unless exactly `expected` non-empty lines are present.
    pub fn from_lines(text: &str, expected: usize) -> Result<MoveVocabulary, PredictError> {
        let moves: IndexSet<String> = text
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();

        if moves.len() != expected {
            return Err(PredictError::VocabularyMismatch {
                expected,
                found: moves.len(),
            });
        }

        log::debug!("loaded move vocabulary with {} entries", moves.len());
        Ok(MoveVocabulary { moves })
    }

    /// Reads a vocabulary file, one UCI move per line.
    pub fn load(path: impl AsRef<Path>, expected: usize) -> Result<MoveVocabulary, PredictError> {
        let text = std::fs::read_to_string(path)?;
        MoveVocabulary::from_lines(&text, expected)
    }

    /// The model's output index for a move, if the move is covered.
    pub fn index_of(&self, uci: &str) -> Option<usize> {
        self.moves.get_index_of(uci)
    }

    /// The move at a model output index.
    pub fn move_at(&self, index: usize) -> Option<&str> {
        self.moves.get_index(index).map(|m| m.as_str())
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
