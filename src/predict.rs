use crate::error::PredictError;
use crate::mirror::mirror_uci;
use crate::vocab::MoveVocabulary;

/// A candidate move and the probability a human of the requested strength
/// plays it. Prediction sets are sorted descending by probability and sum
/// to 1.0 over the covered legal subset.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub uci: String,
    pub probability: f64,
}

/// Restricts a raw score vector to the legal moves and converts the
/// surviving scores into a probability distribution.
///
/// When `mirrored`, every legal move is translated into the model's flipped
/// frame before the vocabulary lookup, while the original move string stays
/// as the label on the output; callers always deal in the original color's
/// move space. Legal moves absent from the vocabulary are dropped; that is
/// an expected coverage gap, not an error. Only when nothing at all
/// resolves does this fail with `NoLegalMovesScored`.
///
/// Softmax runs over the filtered subset only, with the maximum score
/// subtracted before exponentiation. Normalizing over legal moves keeps
/// probability mass off illegal moves entirely.
pub fn extract_predictions(
    scores: &[f32],
    legal_moves: &[String],
    mirrored: bool,
    vocab: &MoveVocabulary,
) -> Result<Vec<Prediction>, PredictError> {
    let mut scored = Vec::with_capacity(legal_moves.len());
    let mut dropped = 0usize;

    for uci in legal_moves {
        let lookup = if mirrored {
            mirror_uci(uci)
        } else {
            uci.clone()
        };
        match vocab.index_of(&lookup).and_then(|index| scores.get(index)) {
            Some(&score) => scored.push((uci.as_str(), score as f64)),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::warn!("{} of {} legal moves missing from the move vocabulary", dropped, legal_moves.len());
    }
    if scored.is_empty() {
        return Err(PredictError::NoLegalMovesScored);
    }

    let max_score = scored
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut sum = 0.0;
    let mut predictions: Vec<Prediction> = scored
        .into_iter()
        .map(|(uci, score)| {
            let weight = (score - max_score).exp();
            sum += weight;
            Prediction {
                uci: uci.to_string(),
                probability: weight,
            }
        })
        .collect();

    for prediction in &mut predictions {
        prediction.probability /= sum;
    }
    predictions.sort_by(|a, b| b.probability.total_cmp(&a.probability));

    Ok(predictions)
}
