use std::collections::HashSet;

use memedo_core::MemedoError;

use crate::template::MemeTemplate;

/// Validate a template catalog for structural correctness.
pub fn validate_templates(templates: &[MemeTemplate]) -> Result<(), Vec<MemedoError>> {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for template in templates {
        if template.id == 0 {
            errors.push(MemedoError::Registry(format!(
                "template '{}' has id 0; ids must be positive",
                template.name
            )));
        }
        if !ids.insert(template.id) {
            errors.push(MemedoError::Registry(format!(
                "duplicate template id: {}",
                template.id
            )));
        }
        if template.name.trim().is_empty() {
            errors.push(MemedoError::Registry(format!(
                "template {} has an empty name",
                template.id
            )));
        }
        if template.asset_extension.trim().is_empty() {
            errors.push(MemedoError::Registry(format!(
                "template {} has no asset extension",
                template.id
            )));
        }
        if template.caption_slots.is_empty() {
            errors.push(MemedoError::Registry(format!(
                "template {} declares no caption slots",
                template.id
            )));
        }

        let mut fields = HashSet::new();
        for slot in &template.caption_slots {
            if !fields.insert(slot.field.as_str()) {
                errors.push(MemedoError::Registry(format!(
                    "duplicate caption field '{}' in template {}",
                    slot.field, template.id
                )));
            }
            if !slot.font_size.is_finite() || slot.font_size <= 0.0 {
                errors.push(MemedoError::Registry(format!(
                    "caption field '{}' in template {} has non-positive font size",
                    slot.field, template.id
                )));
            }
            if slot.wrap_width == Some(0) {
                errors.push(MemedoError::Registry(format!(
                    "caption field '{}' in template {} has a zero wrap width",
                    slot.field, template.id
                )));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::CaptionSlot;

    fn template(id: u32) -> MemeTemplate {
        MemeTemplate::still(id, "Indifferent", "", "jpg")
            .slot(CaptionSlot::new("action", 100, 175, 40.0))
    }

    #[test]
    fn test_validate_valid_catalog() {
        assert!(validate_templates(&[template(1), template(2)]).is_ok());
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let errors = validate_templates(&[template(3), template(3)]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("duplicate template id: 3"));
    }

    #[test]
    fn test_validate_zero_id_and_no_slots() {
        let empty = MemeTemplate::still(0, "Empty", "", "jpg");
        let errors = validate_templates(&[empty]).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_duplicate_fields() {
        let t = template(4).slot(CaptionSlot::new("action", 0, 0, 10.0));
        let errors = validate_templates(&[t]).unwrap_err();
        assert!(errors[0].to_string().contains("duplicate caption field 'action'"));
    }

    #[test]
    fn test_validate_bad_font_size() {
        let t = MemeTemplate::still(5, "Tiny", "", "png")
            .slot(CaptionSlot::new("caption", 0, 0, 0.0).wrap(0));
        let errors = validate_templates(&[t]).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
