// src/llm/pricing.rs
// Model tiers and cost estimation
//
// Prices are USD per million tokens from the public Anthropic price list.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Usage;

/// Selectable model tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    #[default]
    Sonnet,
    Opus,
    Haiku,
}

impl ModelTier {
    /// API model id for this tier
    pub fn model_id(&self) -> &'static str {
        match self {
            Self::Sonnet => "claude-sonnet-4-5",
            Self::Opus => "claude-opus-4-5",
            Self::Haiku => "claude-haiku-4-5",
        }
    }

    pub fn pricing(&self) -> ModelPricing {
        match self {
            Self::Sonnet => ModelPricing::new(3.00, 15.00),
            Self::Opus => ModelPricing::new(5.00, 25.00),
            Self::Haiku => ModelPricing::new(1.00, 5.00),
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sonnet => write!(f, "sonnet"),
            Self::Opus => write!(f, "opus"),
            Self::Haiku => write!(f, "haiku"),
        }
    }
}

/// Cost per million tokens (input, output)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl ModelPricing {
    const fn new(input: f64, output: f64) -> Self {
        Self {
            input_per_million: input,
            output_per_million: output,
        }
    }

    /// Calculate cost for a given usage
    pub fn calculate_cost(&self, usage: &Usage) -> f64 {
        let input_cost = (usage.input_tokens as f64) * self.input_per_million / 1_000_000.0;
        let output_cost = (usage.output_tokens as f64) * self.output_per_million / 1_000_000.0;
        input_cost + output_cost
    }
}
