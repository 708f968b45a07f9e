use std::str::FromStr;

use chess::{Board, MoveGen};
use half::f16;
use rand::rngs::StdRng;
use rand::SeedableRng;

use patzer::{
    HumanMovePredictor, MoveModel, MoveVocabulary, PredictError, PredictionRequest, TENSOR_LEN,
};

const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const INITIAL_FEN_BLACK: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1";

/// White's twenty opening moves, the frame the model scores both colors in.
const VOCAB_MOVES: [&str; 20] = [
    "a2a3", "a2a4", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4", "e2e3", "e2e4", "f2f3",
    "f2f4", "g2g3", "g2g4", "h2h3", "h2h4", "b1a3", "b1c3", "g1f3", "g1h3",
];

fn test_vocab() -> MoveVocabulary {
    let text = VOCAB_MOVES.join("\n");
    MoveVocabulary::from_lines(&text, VOCAB_MOVES.len()).expect("test vocabulary loads")
}

fn legal_moves(fen: &str) -> Vec<String> {
    let board = Board::from_str(fen).expect("valid fen");
    MoveGen::new_legal(&board).map(|m| m.to_string()).collect()
}

/// Stands in for the external model: returns a canned score vector.
struct StubModel {
    scores: Vec<f32>,
}

impl StubModel {
    fn favoring(vocab: &MoveVocabulary, favorites: &[(&str, f32)]) -> StubModel {
        let mut scores = vec![0.0; vocab.len()];
        for (uci, score) in favorites {
            let index = vocab.index_of(uci).expect("favorite move in vocabulary");
            scores[index] = *score;
        }
        StubModel { scores }
    }
}

impl MoveModel for StubModel {
    fn score_moves(
        &self,
        _board: &[f16; TENSOR_LEN],
        _elo_self: i32,
        _elo_oppo: i32,
    ) -> Result<Vec<f32>, PredictError> {
        Ok(self.scores.clone())
    }
}

struct FailingModel;

impl MoveModel for FailingModel {
    fn score_moves(
        &self,
        _board: &[f16; TENSOR_LEN],
        _elo_self: i32,
        _elo_oppo: i32,
    ) -> Result<Vec<f32>, PredictError> {
        Err(PredictError::InferenceFailed("no session".to_string()))
    }
}

#[test]
fn test_white_to_move_ranked_distribution() {
    let vocab = test_vocab();
    let model = StubModel::favoring(&vocab, &[("e2e4", 4.0), ("d2d4", 3.0)]);
    let predictor = HumanMovePredictor::new(model, vocab);

    let legal = legal_moves(INITIAL_FEN);
    assert_eq!(legal.len(), 20);

    let predictions = predictor
        .predict(&PredictionRequest {
            fen: INITIAL_FEN,
            legal_moves: &legal,
            recent_moves: &[],
            elo_self: 1500,
            elo_oppo: 1500,
        })
        .unwrap();

    assert_eq!(predictions.len(), 20);
    assert_eq!(predictions[0].uci, "e2e4");
    assert_eq!(predictions[1].uci, "d2d4");

    let total: f64 = predictions.iter().map(|p| p.probability).sum();
    assert!((total - 1.0).abs() < 1e-5);
}

#[test]
fn test_black_moves_resolve_through_mirroring() {
    // Black to move: the model sees the flipped board, so black's e7e5 must
    // score through the e2e4 slot and come back labeled in black's space.
    let vocab = test_vocab();
    let model = StubModel::favoring(&vocab, &[("e2e4", 5.0)]);
    let predictor = HumanMovePredictor::new(model, vocab);

    let legal = legal_moves(INITIAL_FEN_BLACK);
    assert_eq!(legal.len(), 20);

    let predictions = predictor
        .predict(&PredictionRequest {
            fen: INITIAL_FEN_BLACK,
            legal_moves: &legal,
            recent_moves: &[],
            elo_self: 1200,
            elo_oppo: 1800,
        })
        .unwrap();

    assert_eq!(predictions.len(), 20);
    assert_eq!(predictions[0].uci, "e7e5");
    assert!(predictions.iter().all(|p| legal.contains(&p.uci)));

    let total: f64 = predictions.iter().map(|p| p.probability).sum();
    assert!((total - 1.0).abs() < 1e-5);
}

#[test]
fn test_reversal_history_demotes_the_shuffle() {
    let vocab = test_vocab();
    let model = StubModel::favoring(&vocab, &[("g1f3", 5.0), ("e2e4", 4.0)]);
    let predictor = HumanMovePredictor::new(model, vocab);

    let legal = legal_moves(INITIAL_FEN);
    let recent: Vec<String> = ["f3g1", "f6g8"].iter().map(|m| m.to_string()).collect();

    let without_history = predictor
        .predict(&PredictionRequest {
            fen: INITIAL_FEN,
            legal_moves: &legal,
            recent_moves: &[],
            elo_self: 1500,
            elo_oppo: 1500,
        })
        .unwrap();
    assert_eq!(without_history[0].uci, "g1f3");

    let with_history = predictor
        .predict(&PredictionRequest {
            fen: INITIAL_FEN,
            legal_moves: &legal,
            recent_moves: &recent,
            elo_self: 1500,
            elo_oppo: 1500,
        })
        .unwrap();
    assert_eq!(with_history[0].uci, "e2e4");

    let shuffle = with_history.iter().find(|p| p.uci == "g1f3").unwrap();
    let original = without_history.iter().find(|p| p.uci == "g1f3").unwrap();
    assert!(shuffle.probability < original.probability);

    let total: f64 = with_history.iter().map(|p| p.probability).sum();
    assert!((total - 1.0).abs() < 1e-5);
}

#[test]
fn test_choose_move_at_low_temperature_takes_the_top() {
    let vocab = test_vocab();
    let model = StubModel::favoring(&vocab, &[("e2e4", 6.0), ("d2d4", 1.0)]);
    let predictor = HumanMovePredictor::new(model, vocab);

    let legal = legal_moves(INITIAL_FEN_BLACK);
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let chosen = predictor
            .choose_move(
                &PredictionRequest {
                    fen: INITIAL_FEN_BLACK,
                    legal_moves: &legal,
                    recent_moves: &[],
                    elo_self: 1500,
                    elo_oppo: 1500,
                },
                0.01,
                &mut rng,
            )
            .unwrap();
        assert_eq!(chosen, "e7e5");
    }
}

#[test]
fn test_no_vocabulary_coverage_surfaces() {
    let vocab = test_vocab();
    let model = StubModel::favoring(&vocab, &[]);
    let predictor = HumanMovePredictor::new(model, vocab);

    // Endgame position whose legal moves are all outside the opening-only
    // test vocabulary
    let fen = "8/8/8/4k3/8/8/4K3/8 w - - 0 1";
    let legal = legal_moves(fen);
    assert!(!legal.is_empty());

    let result = predictor.predict(&PredictionRequest {
        fen,
        legal_moves: &legal,
        recent_moves: &[],
        elo_self: 1500,
        elo_oppo: 1500,
    });
    assert!(matches!(result, Err(PredictError::NoLegalMovesScored)));
}

#[test]
fn test_model_failure_propagates() {
    let predictor = HumanMovePredictor::new(FailingModel, test_vocab());
    let legal = legal_moves(INITIAL_FEN);

    let result = predictor.predict(&PredictionRequest {
        fen: INITIAL_FEN,
        legal_moves: &legal,
        recent_moves: &[],
        elo_self: 1500,
        elo_oppo: 1500,
    });
    assert!(matches!(result, Err(PredictError::InferenceFailed(_))));
}
