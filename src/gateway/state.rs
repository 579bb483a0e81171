//! Gateway 应用状态

use std::sync::Arc;

use crate::config::{Modality, ModelConfig};
use crate::providers::Generator;

/// Gateway 应用状态
///
/// Generator 在启动时构造并注入，处理器之间不共享可变状态
#[derive(Clone)]
pub struct AppState {
    generator: Arc<dyn Generator>,
    models: ModelConfig,
}

impl AppState {
    pub fn new(generator: Arc<dyn Generator>, models: ModelConfig) -> Self {
        Self { generator, models }
    }

    pub fn generator(&self) -> &Arc<dyn Generator> {
        &self.generator
    }

    pub fn models(&self) -> &ModelConfig {
        &self.models
    }

    /// 按模态选择模型标识
    pub fn model_for(&self, modality: Modality) -> &str {
        self.models.model_for(modality)
    }
}
