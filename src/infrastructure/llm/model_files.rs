use std::path::PathBuf;

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::Config as BertConfig;
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::{Tokenizer, TruncationParams};

/// Local copies of a BERT-family checkpoint pulled from the Hugging Face hub.
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

impl ModelFiles {
    pub fn download(model_id: &str) -> Result<Self, String> {
        let api = Api::new().map_err(|e| e.to_string())?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let fetch = |name: &str| repo.get(name).map_err(|e| format!("{name}: {e}"));

        Ok(Self {
            config: fetch("config.json")?,
            tokenizer: fetch("tokenizer.json")?,
            weights: fetch("model.safetensors")?,
        })
    }

    pub fn bert_config(&self) -> Result<BertConfig, String> {
        let contents =
            std::fs::read_to_string(&self.config).map_err(|e| format!("read config: {e}"))?;
        serde_json::from_str(&contents).map_err(|e| format!("parse config: {e}"))
    }

    pub fn tokenizer(&self, max_length: usize) -> Result<Tokenizer, String> {
        let mut tokenizer =
            Tokenizer::from_file(&self.tokenizer).map_err(|e| format!("tokenizer: {e}"))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| format!("truncation config: {e}"))?;
        Ok(tokenizer)
    }

    pub fn var_builder(&self, device: &Device) -> Result<VarBuilder<'static>, String> {
        let dtype = select_dtype(device);
        // SAFETY: safetensors files are memory-mapped read-only
        unsafe {
            VarBuilder::from_mmaped_safetensors(std::slice::from_ref(&self.weights), dtype, device)
                .map_err(|e| format!("weights: {e}"))
        }
    }
}

pub fn select_device() -> Device {
    Device::new_metal(0).unwrap_or(Device::Cpu)
}

pub fn select_dtype(device: &Device) -> DType {
    if device.is_cpu() {
        DType::F32
    } else {
        DType::F16
    }
}

/// Token ids, type ids and attention mask for a batch, right-padded with zeros.
pub struct PaddedBatch {
    pub input_ids: Vec<u32>,
    pub type_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
    pub batch_size: usize,
    pub max_len: usize,
}

impl PaddedBatch {
    pub fn from_encodings(encodings: &[tokenizers::Encoding]) -> Self {
        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);
        let capacity = encodings.len() * max_len;

        let mut batch = Self {
            input_ids: Vec::with_capacity(capacity),
            type_ids: Vec::with_capacity(capacity),
            attention_mask: Vec::with_capacity(capacity),
            batch_size: encodings.len(),
            max_len,
        };

        for encoding in encodings {
            let pad_len = max_len - encoding.get_ids().len();

            batch.input_ids.extend_from_slice(encoding.get_ids());
            batch.input_ids.extend(std::iter::repeat_n(0u32, pad_len));

            batch.type_ids.extend_from_slice(encoding.get_type_ids());
            batch.type_ids.extend(std::iter::repeat_n(0u32, pad_len));

            batch.attention_mask.extend_from_slice(encoding.get_attention_mask());
            batch.attention_mask.extend(std::iter::repeat_n(0u32, pad_len));
        }

        batch
    }
}
