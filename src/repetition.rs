use std::collections::HashSet;

use crate::predict::Prediction;

/// How many recent plies are scanned for reversals.
pub const REPETITION_WINDOW: usize = 12;
/// Multiplier applied to a prediction that would reverse a recent move.
pub const REVERSAL_DAMPING: f64 = 0.01;

/// The from/to prefix of `uci` with the two squares swapped.
fn reversed_prefix(uci: &str) -> Option<String> {
    let from = uci.get(..2)?;
    let to = uci.get(2..4)?;
    Some(format!("{}{}", to, from))
}

/// Damps predictions that would immediately reverse a recently played move,
/// then renormalizes the whole distribution.
///
/// A model trained on human games can fall into literal two-move loops
/// (knight shuffles) because each individual move looks locally plausible;
/// the penalty breaks those cycles. This is a stateless function of its
/// inputs: fewer than two recent moves, or no candidate matching the
/// penalty set, returns the input untouched. Promotion suffixes are ignored
/// when matching, only the from/to squares count.
pub fn damp_reversals(mut predictions: Vec<Prediction>, recent_moves: &[String]) -> Vec<Prediction> {
    if recent_moves.len() < 2 {
        return predictions;
    }

    let window_start = recent_moves.len().saturating_sub(REPETITION_WINDOW);
    let penalized: HashSet<String> = recent_moves[window_start..]
        .iter()
        .filter_map(|uci| reversed_prefix(uci))
        .collect();

    let is_reversal = |prediction: &Prediction| {
        prediction
            .uci
            .get(..4)
            .map_or(false, |prefix| penalized.contains(prefix))
    };

    if !predictions.iter().any(is_reversal) {
        return predictions;
    }

    for prediction in &mut predictions {
        if is_reversal(prediction) {
            prediction.probability *= REVERSAL_DAMPING;
        }
    }

    let total: f64 = predictions.iter().map(|p| p.probability).sum();
    if total > 0.0 {
        for prediction in &mut predictions {
            prediction.probability /= total;
        }
    }

    predictions
}
