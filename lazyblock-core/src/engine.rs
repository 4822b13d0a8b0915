use std::collections::HashMap;

use crate::block::Block;
use crate::parser::parse_template;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Placeholder(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub parts: Vec<TemplatePart>,
}

impl Template {
    /// Parses a template string. The grammar accepts arbitrary input, so a
    /// parser error would mean the literal fallback rule is broken; in that
    /// case the whole string is kept as literal text.
    pub fn parse(input: &str) -> Template {
        match parse_template(input) {
            Ok((_, template)) => template,
            Err(_) => Template {
                parts: vec![TemplatePart::Literal(input.to_string())],
            },
        }
    }

    /// Placeholder indices in first-occurrence order, deduplicated.
    pub fn placeholder_indices(&self) -> Vec<u32> {
        let mut indices = Vec::new();
        for part in &self.parts {
            if let TemplatePart::Placeholder(idx) = part {
                if !indices.contains(idx) {
                    indices.push(*idx);
                }
            }
        }
        indices
    }

    /// Substitutes values into placeholders. A placeholder with no value in
    /// the map renders as the empty string.
    pub fn render(&self, values: &HashMap<u32, String>) -> String {
        let mut result = String::new();
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => result.push_str(text),
                TemplatePart::Placeholder(idx) => {
                    if let Some(value) = values.get(idx) {
                        result.push_str(value);
                    }
                }
            }
        }
        result
    }
}

pub fn extract_placeholder_indices(template: &str) -> Vec<u32> {
    Template::parse(template).placeholder_indices()
}

pub fn render(template: &str, values: &HashMap<u32, String>) -> String {
    Template::parse(template).render(values)
}

pub fn render_block_for_input(block: &Block, values: &HashMap<u32, String>) -> String {
    render(&block.input_template, values)
}

pub fn render_block_for_output(block: &Block, values: &HashMap<u32, String>) -> String {
    render(&block.output_template, values)
}
