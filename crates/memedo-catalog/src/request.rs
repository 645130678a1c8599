use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use memedo_core::{MemedoError, MemedoResult};

use crate::template::MemeTemplate;

/// Caller-supplied caption text keyed by field name. Key order carries no meaning.
pub type CaptionFields = HashMap<String, String>;

/// A request to render one template with the given captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub template_id: u32,
    pub caption_fields: CaptionFields,
}

impl RenderRequest {
    pub fn new(template_id: u32) -> Self {
        Self {
            template_id,
            caption_fields: CaptionFields::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.caption_fields.insert(name.into(), text.into());
        self
    }

    /// Build a request from the JSON object the selection model produced.
    ///
    /// Only the template's declared fields are read. A declared field that is
    /// absent is `CaptionFieldMissing`; one that is present but not a string
    /// is a `Render` error, since drawing it would mean guessing a conversion.
    pub fn from_json(template: &MemeTemplate, value: &Value) -> MemedoResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            MemedoError::InvalidArgument(format!(
                "caption input for template {} must be a JSON object",
                template.id
            ))
        })?;

        let mut request = RenderRequest::new(template.id);
        for field in template.field_names() {
            match object.get(field) {
                Some(Value::String(text)) => {
                    request.caption_fields.insert(field.to_string(), text.clone());
                }
                Some(other) => {
                    return Err(MemedoError::Render(format!(
                        "caption field '{}' of template '{}' is not a string: {}",
                        field, template.name, other
                    )));
                }
                None => return Err(MemedoError::missing_field(&template.name, field)),
            }
        }
        Ok(request)
    }
}
