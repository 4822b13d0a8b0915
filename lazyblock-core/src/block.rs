//! The block entity: a named pair of templates plus the input indices the
//! author declared for it.

use serde::{Deserialize, Deserializer, Serialize};

use crate::engine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub name: String,
    pub display_text: String,
    pub input_template: String,
    pub output_template: String,
    #[serde(default, deserialize_with = "normalized_inputs")]
    pub inputs: Vec<u32>,
}

/// Consistency between a block's declared inputs and the placeholders its
/// templates actually reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockValidation {
    pub missing_inputs: Vec<u32>,
    pub unused_inputs: Vec<u32>,
}

impl BlockValidation {
    pub fn is_valid(&self) -> bool {
        self.missing_inputs.is_empty() && self.unused_inputs.is_empty()
    }
}

impl Block {
    /// Declared inputs are normalized here (sorted ascending, deduplicated),
    /// and re-normalized whenever a block is parsed from its record, so the
    /// invariant holds no matter where a block comes from.
    pub fn new(
        name: String,
        display_text: String,
        input_template: String,
        output_template: String,
        inputs: Vec<u32>,
    ) -> Block {
        Block {
            name,
            display_text,
            input_template,
            output_template,
            inputs: normalize_inputs(inputs),
        }
    }

    /// Union of the placeholder indices referenced by either template, sorted
    /// ascending.
    pub fn used_placeholder_indices(&self) -> Vec<u32> {
        let mut indices = engine::extract_placeholder_indices(&self.input_template);
        for idx in engine::extract_placeholder_indices(&self.output_template) {
            if !indices.contains(&idx) {
                indices.push(idx);
            }
        }
        indices.sort_unstable();
        indices
    }

    /// The indices a shell should collect values for: the declared inputs if
    /// any, otherwise whatever the templates reference.
    pub fn required_input_indices(&self) -> Vec<u32> {
        if self.inputs.is_empty() {
            self.used_placeholder_indices()
        } else {
            self.inputs.clone()
        }
    }

    pub fn validate(&self) -> BlockValidation {
        let used = self.used_placeholder_indices();
        let missing_inputs = used
            .iter()
            .filter(|idx| !self.inputs.contains(idx))
            .copied()
            .collect();
        let unused_inputs = self
            .inputs
            .iter()
            .filter(|idx| !used.contains(idx))
            .copied()
            .collect();
        BlockValidation {
            missing_inputs,
            unused_inputs,
        }
    }
}

fn normalize_inputs(mut inputs: Vec<u32>) -> Vec<u32> {
    inputs.sort_unstable();
    inputs.dedup();
    inputs
}

fn normalized_inputs<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalize_inputs(Vec::deserialize(deserializer)?))
}
