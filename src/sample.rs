use rand::Rng;

use crate::predict::Prediction;

/// Reshapes a distribution through `softmax(ln(p) / temperature)`, with the
/// maximum logit subtracted before exponentiation. Zero probabilities map to
/// a `-inf` logit and contribute zero mass afterwards.
fn reshape_with_temperature(predictions: &[Prediction], temperature: f64) -> Vec<f64> {
    let logits: Vec<f64> = predictions
        .iter()
        .map(|p| {
            if p.probability > 0.0 {
                p.probability.ln() / temperature
            } else {
                f64::NEG_INFINITY
            }
        })
        .collect();

    let max_logit = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max_logit == f64::NEG_INFINITY {
        // Every entry was zero; reshaping has nothing to work with
        return predictions.iter().map(|p| p.probability).collect();
    }

    let weights: Vec<f64> = logits.iter().map(|l| (l - max_logit).exp()).collect();
    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// Draws one move from the distribution.
///
/// With `temperature == 1.0` the supplied probabilities are used as-is;
/// otherwise the distribution is reshaped first. The RNG is injected so
/// callers control determinism. Returns `None` only for an empty slice.
///
/// The draw walks the cumulative mass; if floating-point drift leaves the
/// cumulative sum slightly under the drawn value, the last entry wins.
pub fn sample_move<R: Rng>(
    predictions: &[Prediction],
    temperature: f64,
    rng: &mut R,
) -> Option<String> {
    if predictions.is_empty() {
        return None;
    }

    let weights = if temperature == 1.0 {
        predictions.iter().map(|p| p.probability).collect()
    } else {
        reshape_with_temperature(predictions, temperature)
    };

    let draw: f64 = rng.gen_range(0.0..1.0);
    let mut cumulative = 0.0;
    for (prediction, weight) in predictions.iter().zip(&weights) {
        cumulative += weight;
        if draw < cumulative {
            return Some(prediction.uci.clone());
        }
    }

    predictions.last().map(|p| p.uci.clone())
}
