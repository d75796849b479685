use async_trait::async_trait;
use candle_core::{DType, Device, Module, Tensor};
use candle_nn::Linear;
use candle_transformers::models::bert::BertModel;
use tokenizers::Tokenizer;

use crate::application::ports::{Reranker, RerankerError};
use crate::infrastructure::llm::model_files::{ModelFiles, PaddedBatch, select_device};

use super::sigmoid;

/// BERT sequence-classification cross-encoder (e.g. the ms-marco family).
///
/// Each `(query, passage)` pair is encoded jointly; the `[CLS]` state goes
/// through the pooler and a single-logit classifier head.
pub struct CandleCrossEncoder {
    model: BertModel,
    pooler: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    device: Device,
}

fn inference_failed(e: impl std::fmt::Display) -> RerankerError {
    RerankerError::InferenceFailed(e.to_string())
}

impl CandleCrossEncoder {
    pub fn new(model_id: &str) -> Result<Self, RerankerError> {
        let device = select_device();
        tracing::info!(device = ?device, model = model_id, "Initializing cross-encoder");

        let files = ModelFiles::download(model_id).map_err(RerankerError::ModelLoadFailed)?;
        let config = files.bert_config().map_err(RerankerError::ModelLoadFailed)?;
        let tokenizer = files
            .tokenizer(config.max_position_embeddings)
            .map_err(RerankerError::ModelLoadFailed)?;
        let vb = files
            .var_builder(&device)
            .map_err(RerankerError::ModelLoadFailed)?;

        let model = BertModel::load(vb.pp("bert"), &config)
            .map_err(|e| RerankerError::ModelLoadFailed(format!("encoder: {e}")))?;
        let pooler = candle_nn::linear(
            config.hidden_size,
            config.hidden_size,
            vb.pp("bert.pooler.dense"),
        )
        .map_err(|e| RerankerError::ModelLoadFailed(format!("pooler: {e}")))?;
        let classifier = candle_nn::linear(config.hidden_size, 1, vb.pp("classifier"))
            .map_err(|e| RerankerError::ModelLoadFailed(format!("classifier: {e}")))?;

        tracing::info!("Cross-encoder loaded");

        Ok(Self {
            model,
            pooler,
            classifier,
            tokenizer,
            device,
        })
    }

    fn logits(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>, RerankerError> {
        let pairs: Vec<(&str, &str)> = passages.iter().map(|p| (query, *p)).collect();
        let encodings = self
            .tokenizer
            .encode_batch(pairs, true)
            .map_err(|e| RerankerError::InferenceFailed(format!("tokenization: {e}")))?;

        let batch = PaddedBatch::from_encodings(&encodings);
        let shape = (batch.batch_size, batch.max_len);

        let input_ids =
            Tensor::from_vec(batch.input_ids, shape, &self.device).map_err(inference_failed)?;
        let token_type_ids =
            Tensor::from_vec(batch.type_ids, shape, &self.device).map_err(inference_failed)?;
        let attention_mask =
            Tensor::from_vec(batch.attention_mask, shape, &self.device).map_err(inference_failed)?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(inference_failed)?;

        self.classify(&hidden).map_err(inference_failed)
    }

    fn classify(&self, hidden: &Tensor) -> candle_core::Result<Vec<f32>> {
        let cls = hidden.narrow(1, 0, 1)?.squeeze(1)?;
        let pooled = self.pooler.forward(&cls)?.tanh()?;
        self.classifier
            .forward(&pooled)?
            .squeeze(1)?
            .to_dtype(DType::F32)?
            .to_vec1()
    }
}

#[async_trait]
impl Reranker for CandleCrossEncoder {
    async fn score(&self, query: &str, passages: &[&str]) -> Result<Vec<f32>, RerankerError> {
        if passages.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .logits(query, passages)?
            .into_iter()
            .map(sigmoid)
            .collect())
    }
}
