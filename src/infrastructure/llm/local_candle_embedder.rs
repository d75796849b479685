use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_transformers::models::bert::BertModel;
use tokenizers::Tokenizer;

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

use super::model_files::{ModelFiles, PaddedBatch, select_device};

/// Sentence embeddings from a BERT checkpoint: mean pooling over the
/// attention mask followed by L2 normalization.
pub struct LocalCandleEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

fn inference_failed(e: impl std::fmt::Display) -> EmbedderError {
    EmbedderError::InferenceFailed(e.to_string())
}

impl LocalCandleEmbedder {
    pub fn new(model_id: &str) -> Result<Self, EmbedderError> {
        let device = select_device();
        tracing::info!(device = ?device, model = model_id, "Initializing local embedding model");

        let files = ModelFiles::download(model_id).map_err(EmbedderError::ModelLoadFailed)?;
        let config = files.bert_config().map_err(EmbedderError::ModelLoadFailed)?;
        let tokenizer = files
            .tokenizer(config.max_position_embeddings)
            .map_err(EmbedderError::ModelLoadFailed)?;
        let vb = files
            .var_builder(&device)
            .map_err(EmbedderError::ModelLoadFailed)?;

        let model = BertModel::load(vb, &config)
            .map_err(|e| EmbedderError::ModelLoadFailed(format!("model: {e}")))?;

        tracing::info!("Local embedding model loaded");

        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }

    fn encode_texts(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbedderError::InferenceFailed(format!("tokenization: {e}")))?;

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
            .and_then(|t| t.to_dtype(DType::F32))
            .map_err(inference_failed)?;

        let mask = attention_mask
            .to_dtype(DType::F32)
            .map_err(inference_failed)?;
        let pooled = mean_pool(&hidden, &mask).map_err(inference_failed)?;

        let mut results = Vec::with_capacity(batch.batch_size);
        for i in 0..batch.batch_size {
            let mut values: Vec<f32> = pooled
                .get(i)
                .and_then(|row| row.to_vec1())
                .map_err(inference_failed)?;
            l2_normalize(&mut values);
            results.push(values);
        }

        Ok(results)
    }
}

fn mean_pool(hidden: &Tensor, mask: &Tensor) -> candle_core::Result<Tensor> {
    let summed = hidden.broadcast_mul(&mask.unsqueeze(2)?)?.sum(1)?;
    let counts = mask.sum(1)?.unsqueeze(1)?;
    summed.broadcast_div(&counts)
}

fn l2_normalize(v: &mut [f32]) {
    let length: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if length > 0.0 {
        v.iter_mut().for_each(|x| *x /= length);
    }
}

#[async_trait]
impl Embedder for LocalCandleEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.encode_texts(&[text])?
            .into_iter()
            .next()
            .map(Embedding::new)
            .ok_or_else(|| EmbedderError::InferenceFailed("empty result".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .encode_texts(texts)?
            .into_iter()
            .map(Embedding::new)
            .collect())
    }
}
