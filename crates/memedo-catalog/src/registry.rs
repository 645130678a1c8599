use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use memedo_core::{MemedoError, MemedoResult};

use crate::catalog;
use crate::template::MemeTemplate;
use crate::validate::validate_templates;

/// Template metadata handed to the selection model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub instruction: String,
}

/// Ordered, immutable catalog of meme templates keyed by id.
///
/// Safe to share across threads; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<MemeTemplate>,
    index: HashMap<u32, usize>,
}

impl TemplateRegistry {
    /// Build a registry from templates in registration order.
    pub fn new(templates: Vec<MemeTemplate>) -> MemedoResult<Self> {
        if let Err(errors) = validate_templates(&templates) {
            let joined = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(MemedoError::Registry(joined));
        }

        let index = templates
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, i))
            .collect();

        tracing::debug!("registered {} meme templates", templates.len());
        Ok(Self { templates, index })
    }

    /// The built-in catalog.
    pub fn builtin() -> MemedoResult<Self> {
        Self::new(catalog::builtin_templates())
    }

    /// Look up a template by id.
    pub fn resolve(&self, id: u32) -> MemedoResult<&MemeTemplate> {
        self.get(id).ok_or(MemedoError::TemplateNotFound(id))
    }

    pub fn get(&self, id: u32) -> Option<&MemeTemplate> {
        self.index.get(&id).map(|&i| &self.templates[i])
    }

    /// Metadata for every template, in registration order.
    pub fn all(&self) -> Vec<TemplateInfo> {
        self.templates
            .iter()
            .map(|t| TemplateInfo {
                id: t.id,
                name: t.name.clone(),
                description: t.description.clone(),
                instruction: t.instruction().to_string(),
            })
            .collect()
    }

    pub fn templates(&self) -> &[MemeTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Catalog description block for the selection model's system prompt.
    ///
    /// One section per template: id, name, description, then its examples,
    /// plus the caption keys the model must produce.
    pub fn system_context(&self) -> String {
        let mut out = String::new();
        for template in &self.templates {
            let keys = template.field_names().collect::<Vec<_>>().join(", ");
            out.push_str(&format!(
                "id: {}\nname: {}\ndescription: {}\ncaption keys: {}\n{}\n\n",
                template.id,
                template.name,
                template.description,
                keys,
                template.instruction()
            ));
        }
        out
    }
}
