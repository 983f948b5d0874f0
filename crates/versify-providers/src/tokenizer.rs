//! Token counting bound to a target model's tokenizer.

use std::fmt;

use tiktoken_rs::{get_bpe_from_model, CoreBPE};

use versify_core::TokenCounter;

use crate::error::{ProviderError, ProviderResult};

/// A [`TokenCounter`] backed by the BPE vocabulary of a specific
/// model.
///
/// Counting is deterministic for a given model and happens entirely
/// in-process, so the count always reflects the exact text handed to
/// the completion provider.
pub struct ModelTokenCounter {
    model: String,
    bpe: CoreBPE,
}

impl fmt::Debug for ModelTokenCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelTokenCounter")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ModelTokenCounter {
    /// Look up the tokenizer for `model`.
    pub fn for_model(model: &str) -> ProviderResult<Self> {
        let bpe = get_bpe_from_model(model).map_err(|_| ProviderError::UnsupportedModel {
            model: model.to_string(),
        })?;
        Ok(Self {
            model: model.to_string(),
            bpe,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TokenCounter for ModelTokenCounter {
    fn count_tokens(&self, text: &str) -> versify_core::Result<usize> {
        Ok(self.bpe.encode_with_special_tokens(text).len())
    }
}
