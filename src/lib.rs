//! Predicts the move a human player of a given strength would play,
//! standing in for a human opponent instead of searching for the best move.
//!
//! A pretrained move-classification model does the scoring; this crate owns
//! everything around it: rendering a FEN position into the exact tensor the
//! model expects (with color mirroring onto a canonical mover), mapping
//! ratings to the model's skill buckets, restricting the raw scores to the
//! legal moves and softmaxing them into a distribution, damping move
//! reversals, and sampling with an optional temperature.
//!
//! Legal move generation is the caller's job; the pipeline trusts the
//! supplied move list and only filters it against the model's vocabulary.

pub mod encode;
pub mod error;
pub mod infer;
pub mod mirror;
pub mod predict;
pub mod predictor;
pub mod repetition;
pub mod sample;
pub mod skill;
pub mod vocab;

pub use encode::{encode_fen, EncodedPosition, TENSOR_LEN};
pub use error::PredictError;
pub use infer::{ModelConfig, MoveModel, OnnxModel};
pub use mirror::mirror_uci;
pub use predict::{extract_predictions, Prediction};
pub use predictor::{HumanMovePredictor, PredictionRequest};
pub use repetition::damp_reversals;
pub use sample::sample_move;
pub use skill::{bucket_for_rating, SkillConfig};
pub use vocab::{MoveVocabulary, VOCAB_SIZE};
