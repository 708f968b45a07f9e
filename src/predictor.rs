use rand::Rng;

use crate::encode::encode_fen;
use crate::error::PredictError;
use crate::infer::MoveModel;
use crate::predict::{extract_predictions, Prediction};
use crate::repetition::damp_reversals;
use crate::sample::sample_move;
use crate::skill::{bucket_for_rating, SkillConfig};
use crate::vocab::MoveVocabulary;

/// One prediction query: the position, the rules engine's legal moves for
/// it, the recent move history of the game (both sides interleaved), and
/// the two ratings.
pub struct PredictionRequest<'a> {
    pub fen: &'a str,
    pub legal_moves: &'a [String],
    pub recent_moves: &'a [String],
    pub elo_self: i32,
    pub elo_oppo: i32,
}

/// The full pipeline around one model instance: encode the position,
/// bucketize the ratings, score, restrict to legal moves, damp reversals,
/// and optionally sample.
///
/// Every stage is a pure function; the predictor itself holds only the
/// read-only vocabulary, the skill breakpoints and the model handle, so a
/// single instance may serve concurrent sessions.
pub struct HumanMovePredictor<M: MoveModel> {
    model: M,
    vocab: MoveVocabulary,
    skill: SkillConfig,
}

impl<M: MoveModel> HumanMovePredictor<M> {
    pub fn new(model: M, vocab: MoveVocabulary) -> HumanMovePredictor<M> {
        HumanMovePredictor::with_skill_config(model, vocab, SkillConfig::default())
    }

    pub fn with_skill_config(
        model: M,
        vocab: MoveVocabulary,
        skill: SkillConfig,
    ) -> HumanMovePredictor<M> {
        HumanMovePredictor { model, vocab, skill }
    }

    pub fn vocabulary(&self) -> &MoveVocabulary {
        &self.vocab
    }

    /// Runs the pipeline and returns the ranked distribution over legal
    /// moves, most probable first. Callers wanting the single most human
    /// move without randomness take the first entry.
    pub fn predict(&self, request: &PredictionRequest) -> Result<Vec<Prediction>, PredictError> {
        let encoded = encode_fen(request.fen);
        let elo_self = bucket_for_rating(request.elo_self, &self.skill);
        let elo_oppo = bucket_for_rating(request.elo_oppo, &self.skill);

        let scores = self.model.score_moves(&encoded.tensor, elo_self, elo_oppo)?;
        let predictions =
            extract_predictions(&scores, request.legal_moves, encoded.mirrored, &self.vocab)?;

        let mut predictions = damp_reversals(predictions, request.recent_moves);
        predictions.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Ok(predictions)
    }

    /// Runs the pipeline and draws one move from the final distribution.
    pub fn choose_move<R: Rng>(
        &self,
        request: &PredictionRequest,
        temperature: f64,
        rng: &mut R,
    ) -> Result<String, PredictError> {
        let predictions = self.predict(request)?;
        sample_move(&predictions, temperature, rng).ok_or(PredictError::NoLegalMovesScored)
    }
}
