//! Pure Yew view components for the slab upload form.
//!
//! Each component renders one form row from props; state lives in
//! [`crate::hooks::use_upload_form`].

use crate::config::{
    ACCEPTED_IMAGE_TYPES, IMAGE_INPUT_ID, NOTES_INPUT_ID, PRESET_SELECT_ID, TERMS_INPUT_ID,
    THICKNESS_INPUT_ID, THICKNESS_MIN, THICKNESS_STEP, UNIT_SELECT_ID,
};
use crate::utils::{format_file_size, is_image_mime};
use slab_upload::submission::{ImageAttachment, ValidationErrors, ValidationReason};
use slab_upload::{fields, PresetChoice, ThicknessSelection, Unit, PRESETS};
use yew::prelude::*;

/// Renders an inline error line when `reason` is set.
fn render_error(reason: Option<ValidationReason>) -> Html {
    match reason {
        Some(r) => html! { <div class="input-error">{ r.to_string() }</div> },
        None => html! {},
    }
}

fn reason_if(errors: &Option<ValidationErrors>, reason: ValidationReason) -> Option<ValidationReason> {
    errors
        .as_ref()
        .filter(|e| e.contains(reason))
        .map(|_| reason)
}

/// File chooser for the slab photo.
#[derive(Properties, PartialEq)]
pub struct ImageFieldProps {
    pub image: Option<ImageAttachment>,
    pub errors: Option<ValidationErrors>,
    pub onchange: Callback<Event>,
}

#[function_component(ImageField)]
pub fn image_field(props: &ImageFieldProps) -> Html {
    let error = reason_if(&props.errors, ValidationReason::MissingImage);

    html! {
        <div class="form-group">
            <label for={IMAGE_INPUT_ID}>{ "Slab image:" }</label>
            <input type="file"
                id={IMAGE_INPUT_ID}
                name={fields::IMAGE}
                accept={ACCEPTED_IMAGE_TYPES}
                required=true
                class={if error.is_some() { "invalid" } else { "" }}
                onchange={props.onchange.clone()}
            />
            if let Some(ref img) = props.image {
                <div class="file-info">
                    { format!("{} ({})", img.file_name, format_file_size(img.size_bytes)) }
                </div>
                if !is_image_mime(&img.mime_type) {
                    <div class="input-warning">{ "This file does not look like an image." }</div>
                }
            }
            { render_error(error) }
        </div>
    }
}

/// Preset selector plus the numeric thickness and unit inputs.
#[derive(Properties, PartialEq)]
pub struct ThicknessFieldProps {
    pub selection: ThicknessSelection,
    /// Option shown in the preset selector
    pub preset: PresetChoice,
    pub errors: Option<ValidationErrors>,
    pub on_preset_change: Callback<Event>,
    pub on_value_input: Callback<InputEvent>,
    pub on_unit_change: Callback<Event>,
}

#[function_component(ThicknessField)]
pub fn thickness_field(props: &ThicknessFieldProps) -> Html {
    let error = props.errors.as_ref().and_then(|e| e.thickness_reason());
    let shown = props.preset.form_value();
    // Selector still shows a preset the values no longer match
    let diverged = match props.preset {
        PresetChoice::Preset(p) => props.selection.active_preset() != Some(p),
        PresetChoice::None => false,
    };

    html! {
        <div class="form-group thickness-group">
            <label for={PRESET_SELECT_ID}>{ "Stone thickness:" }</label>
            <select id={PRESET_SELECT_ID} onchange={props.on_preset_change.clone()}>
                <option value="" selected={shown.is_empty()}>{ "-- Choose a common thickness --" }</option>
                { PRESETS.iter().map(|p| {
                    let value = p.form_value();
                    html! {
                        <option value={value.clone()} selected={value == shown}>{ p.label }</option>
                    }
                }).collect::<Html>() }
            </select>
            <div class="thickness-custom">
                <input type="number"
                    id={THICKNESS_INPUT_ID}
                    name={fields::THICKNESS}
                    step={THICKNESS_STEP}
                    min={THICKNESS_MIN}
                    required=true
                    value={props.selection.value.clone()}
                    class={if error.is_some() { "invalid" } else { "" }}
                    oninput={props.on_value_input.clone()}
                />
                <select id={UNIT_SELECT_ID}
                    name={fields::UNIT}
                    required=true
                    onchange={props.on_unit_change.clone()}
                >
                    { Unit::ALL.iter().map(|u| html! {
                        <option value={u.as_form_value()} selected={*u == props.selection.unit}>
                            { u.label() }
                        </option>
                    }).collect::<Html>() }
                </select>
            </div>
            if diverged {
                <div class="input-hint">{ "Custom value; the selected preset no longer applies." }</div>
            }
            { render_error(error) }
        </div>
    }
}

/// Optional free-text notes.
#[derive(Properties, PartialEq)]
pub struct NotesFieldProps {
    pub notes: String,
    pub oninput: Callback<InputEvent>,
}

#[function_component(NotesField)]
pub fn notes_field(props: &NotesFieldProps) -> Html {
    html! {
        <div class="form-group">
            <label for={NOTES_INPUT_ID}>{ "Notes (optional):" }</label>
            <textarea
                id={NOTES_INPUT_ID}
                name={fields::NOTES}
                rows="4"
                placeholder="Anything we should know about this slab"
                value={props.notes.clone()}
                oninput={props.oninput.clone()}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TermsFieldProps {
    pub accepted: bool,
    pub errors: Option<ValidationErrors>,
    pub onchange: Callback<Event>,
}

#[function_component(TermsField)]
pub fn terms_field(props: &TermsFieldProps) -> Html {
    let error = reason_if(&props.errors, ValidationReason::TermsNotAccepted);

    html! {
        <div class="form-group checkbox-group">
            <label>
                <input type="checkbox"
                    id={TERMS_INPUT_ID}
                    name={fields::TERMS}
                    required=true
                    checked={props.accepted}
                    onchange={props.onchange.clone()}
                />
                { " I accept the terms and conditions" }
            </label>
            { render_error(error) }
        </div>
    }
}

/// Lists every reason the last submit was blocked.
#[derive(Properties, PartialEq)]
pub struct ValidationSummaryProps {
    pub errors: Option<ValidationErrors>,
}

#[function_component(ValidationSummary)]
pub fn validation_summary(props: &ValidationSummaryProps) -> Html {
    let Some(ref errors) = props.errors else {
        return html! {};
    };
    if errors.is_empty() {
        return html! {};
    }

    html! {
        <div class="validation-summary" role="alert">
            <p>{ match errors.len() {
                1 => "Please fix the following issue before submitting:".to_string(),
                n => format!("Please fix the following {} issues before submitting:", n),
            } }</p>
            <ul>
                { errors.reasons().iter().map(|r| html! { <li>{ r.to_string() }</li> }).collect::<Html>() }
            </ul>
        </div>
    }
}
