use crate::utils::attachment_from_input;
use log::{debug, info};
use slab_upload::submission::{validate, SubmissionForm, ValidationErrors};
use slab_upload::{apply_preset, PresetChoice, Unit};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Holds the upload form state and the callbacks bound to its fields.
#[derive(Clone)]
pub struct UploadForm {
    /// Current contents of every field.
    pub form: SubmissionForm,
    /// What the preset selector displays. Manual edits do not reset it.
    pub preset_display: PresetChoice,
    /// Violations from the last blocked submit, if any.
    pub errors: Option<ValidationErrors>,
    pub on_image_change: Callback<Event>,
    pub on_preset_change: Callback<Event>,
    pub on_thickness_input: Callback<InputEvent>,
    pub on_unit_change: Callback<Event>,
    pub on_notes_input: Callback<InputEvent>,
    pub on_terms_change: Callback<Event>,
    /// Blocks the native submission unless the form validates.
    pub on_submit: Callback<SubmitEvent>,
}

/// Custom hook wiring the pure form model to the DOM events of the upload form.
#[hook]
pub fn use_upload_form() -> UploadForm {
    let form_handle: UseStateHandle<SubmissionForm> = use_state(SubmissionForm::default);
    let preset_handle: UseStateHandle<PresetChoice> = use_state(|| PresetChoice::None);
    let errors_handle: UseStateHandle<Option<ValidationErrors>> = use_state(|| None);

    let on_image_change = {
        let form_setter = form_handle.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let image = attachment_from_input(&input);
            debug!("Image selected: {:?}", image.as_ref().map(|i| &i.file_name));
            form_setter.set(SubmissionForm {
                image,
                ..(*form_setter).clone()
            });
        })
    };

    let on_preset_change = {
        let form_setter = form_handle.clone();
        let preset_setter = preset_handle.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let choice = PresetChoice::from_form_value(&select.value());
            let current = (*form_setter).clone();
            form_setter.set(SubmissionForm {
                selection: apply_preset(current.selection.clone(), choice),
                ..current
            });
            preset_setter.set(choice);
        })
    };

    let on_thickness_input = {
        let form_setter = form_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let current = (*form_setter).clone();
            form_setter.set(SubmissionForm {
                selection: current.selection.clone().with_value(input.value()),
                ..current
            });
        })
    };

    let on_unit_change = {
        let form_setter = form_handle.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<Unit>() {
                Ok(unit) => {
                    let current = (*form_setter).clone();
                    form_setter.set(SubmissionForm {
                        selection: current.selection.clone().with_unit(unit),
                        ..current
                    });
                }
                Err(err) => log::warn!("{}", err),
            }
        })
    };

    let on_notes_input = {
        let form_setter = form_handle.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            form_setter.set(SubmissionForm {
                notes: area.value(),
                ..(*form_setter).clone()
            });
        })
    };

    let on_terms_change = {
        let form_setter = form_handle.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form_setter.set(SubmissionForm {
                terms_accepted: input.checked(),
                ..(*form_setter).clone()
            });
        })
    };

    let on_submit = {
        let current_form = form_handle.clone();
        let error_setter = errors_handle.clone();
        Callback::from(move |e: SubmitEvent| match validate(&current_form) {
            Ok(request) => {
                info!(
                    "Submitting slab {} at {} {} ({:.1} mm)",
                    request.image.file_name,
                    request.thickness,
                    request.unit,
                    request.thickness_mm()
                );
                if let Ok(json) = serde_json::to_string(&request.fields()) {
                    debug!("Multipart fields: {}", json);
                }
                error_setter.set(None);
                // Falls through to the browser's own multipart POST.
            }
            Err(errors) => {
                e.prevent_default();
                info!("Submission blocked: {}", errors);
                error_setter.set(Some(errors));
            }
        })
    };

    UploadForm {
        form: (*form_handle).clone(),
        preset_display: *preset_handle,
        errors: (*errors_handle).clone(),
        on_image_change,
        on_preset_change,
        on_thickness_input,
        on_unit_change,
        on_notes_input,
        on_terms_change,
        on_submit,
    }
}
