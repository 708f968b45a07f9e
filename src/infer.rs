//! ONNX Runtime inference for the move-classification model.
//!
//! The model is an opaque scoring function; nothing in this crate inspects
//! or retrains it. One session handle supports one in-flight call at a
//! time, so the session sits behind a mutex and concurrent callers
//! serialize on it.

use std::sync::Mutex;

use half::f16;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use serde::{Deserialize, Serialize};

use crate::encode::TENSOR_LEN;
use crate::error::PredictError;

/// Scores every vocabulary move for an encoded position.
///
/// Implementations take the board tensor plus the mover's and opponent's
/// skill buckets and return one raw score per vocabulary entry. The call
/// blocks and has no side effects visible to the pipeline.
pub trait MoveModel {
    fn score_moves(
        &self,
        board: &[f16; TENSOR_LEN],
        elo_self: i32,
        elo_oppo: i32,
    ) -> Result<Vec<f32>, PredictError>;
}

/// Where the model lives and how to talk to it. The output tensor name is
/// configuration because it is not stable across model exports.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_path: String,
    pub output_name: String,
    pub intra_threads: usize,
}

impl Default for ModelConfig {
    fn default() -> ModelConfig {
        ModelConfig {
            model_path: "model.onnx".to_string(),
            output_name: "logits".to_string(),
            intra_threads: 4,
        }
    }
}

/// Session wrapper for a move-classification model in ONNX form.
pub struct OnnxModel {
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxModel {
    /// Loads the model file and prepares a session.
    pub fn load(config: &ModelConfig) -> Result<OnnxModel, ort::Error> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(config.intra_threads)?
            .commit_from_file(&config.model_path)?;

        log::debug!("loaded model from {}", config.model_path);
        Ok(OnnxModel {
            session: Mutex::new(session),
            output_name: config.output_name.clone(),
        })
    }
}

impl MoveModel for OnnxModel {
    fn score_moves(
        &self,
        board: &[f16; TENSOR_LEN],
        elo_self: i32,
        elo_oppo: i32,
    ) -> Result<Vec<f32>, PredictError> {
        let boards = Tensor::from_array(([1usize, TENSOR_LEN], board.to_vec()))
            .map_err(|e| PredictError::InferenceFailed(e.to_string()))?;
        let elos_self = Tensor::from_array(([1usize], vec![elo_self]))
            .map_err(|e| PredictError::InferenceFailed(e.to_string()))?;
        let elos_oppo = Tensor::from_array(([1usize], vec![elo_oppo]))
            .map_err(|e| PredictError::InferenceFailed(e.to_string()))?;

        // Lock the session for inference (lock released when scope ends)
        let mut session = self
            .session
            .lock()
            .map_err(|_| PredictError::InferenceFailed("model session poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![
                "boards" => boards,
                "elos_self" => elos_self,
                "elos_oppo" => elos_oppo,
            ])
            .map_err(|e| PredictError::InferenceFailed(e.to_string()))?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            PredictError::InferenceFailed(format!("model has no output named {}", self.output_name))
        })?;
        let (_, scores) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictError::InferenceFailed(e.to_string()))?;

        Ok(scores.to_vec())
    }
}
