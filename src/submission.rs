//! Submission gate for the slab upload form.
//!
//! The form may only be posted when an image is attached, the thickness
//! field holds a usable value and the terms are accepted. [`validate`]
//! checks all of them at once so every violation can be shown together,
//! and is the only way to obtain a [`SubmissionRequest`].

use crate::{fields, parse_thickness, Thickness, ThicknessError, ThicknessSelection, Unit};
use serde::Serialize;
use std::fmt;

/// Value the browser sends for a checked checkbox without a `value` attribute.
pub const TERMS_CHECKED_VALUE: &str = "on";

/// Metadata of the file picked in the image input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl ImageAttachment {
    /// A file input can report a file with no name; the endpoint treats
    /// that as no upload at all.
    pub fn is_present(&self) -> bool {
        !self.file_name.is_empty()
    }
}

/// Complete state of the upload form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmissionForm {
    pub image: Option<ImageAttachment>,
    pub selection: ThicknessSelection,
    pub notes: String,
    pub terms_accepted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    MissingImage,
    MissingThickness,
    InvalidThickness(ThicknessError),
    TermsNotAccepted,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::MissingImage => write!(f, "Please select a slab image"),
            ValidationReason::MissingThickness => write!(f, "Stone thickness is missing"),
            ValidationReason::InvalidThickness(e) => write!(f, "{}", e),
            ValidationReason::TermsNotAccepted => {
                write!(f, "You must accept the terms and conditions")
            }
        }
    }
}

/// Every unmet submission condition, in form order (image, thickness, terms).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    reasons: Vec<ValidationReason>,
}

impl ValidationErrors {
    fn push(&mut self, reason: ValidationReason) {
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
    }

    pub fn reasons(&self) -> &[ValidationReason] {
        &self.reasons
    }

    pub fn contains(&self, reason: ValidationReason) -> bool {
        self.reasons.contains(&reason)
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    /// The thickness-related reason, for rendering next to that field.
    pub fn thickness_reason(&self) -> Option<ValidationReason> {
        self.reasons.iter().copied().find(|r| {
            matches!(
                r,
                ValidationReason::MissingThickness | ValidationReason::InvalidThickness(_)
            )
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.reasons.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// One multipart field of the outbound POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    File(ImageAttachment),
    Text(String),
}

/// A form that passed [`validate`]; ready to be posted to the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRequest {
    pub image: ImageAttachment,
    #[serde(serialize_with = "serialize_display")]
    pub thickness: Thickness,
    /// Thickness field text exactly as the browser posts it
    pub thickness_text: String,
    pub unit: Unit,
    pub notes: String,
}

fn serialize_display<S: serde::Serializer>(t: &Thickness, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(t)
}

impl SubmissionRequest {
    /// The multipart fields, in the order the form declares them. Values are
    /// the raw field contents the browser sends, not the normalized thickness.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            (fields::IMAGE, FieldValue::File(self.image.clone())),
            (fields::THICKNESS, FieldValue::Text(self.thickness_text.clone())),
            (fields::UNIT, FieldValue::Text(self.unit.as_form_value().to_string())),
            (fields::NOTES, FieldValue::Text(self.notes.clone())),
            (fields::TERMS, FieldValue::Text(TERMS_CHECKED_VALUE.to_string())),
        ]
    }

    pub fn thickness_mm(&self) -> f64 {
        self.thickness.millimeters(self.unit)
    }
}

/// Check every submission condition and build the request when all hold.
pub fn validate(form: &SubmissionForm) -> Result<SubmissionRequest, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let image = form.image.as_ref().filter(|img| img.is_present());
    if image.is_none() {
        errors.push(ValidationReason::MissingImage);
    }

    let thickness = match parse_thickness(&form.selection.value) {
        Ok(t) => Some(t),
        Err(ThicknessError::Empty) => {
            errors.push(ValidationReason::MissingThickness);
            None
        }
        Err(e) => {
            errors.push(ValidationReason::InvalidThickness(e));
            None
        }
    };

    if !form.terms_accepted {
        errors.push(ValidationReason::TermsNotAccepted);
    }

    match (image, thickness) {
        (Some(image), Some(thickness)) if errors.is_empty() => Ok(SubmissionRequest {
            image: image.clone(),
            thickness,
            thickness_text: form.selection.value.clone(),
            unit: form.selection.unit,
            notes: form.notes.clone(),
        }),
        _ => Err(errors),
    }
}
