//! Main module for the slab upload form using Yew.
//! Wires the form state hook to the field components.

use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod logger;
mod utils;

use components::{ImageField, NotesField, TermsField, ThicknessField, ValidationSummary};
use config::*;
use hooks::use_upload_form;

/// Upload form component. The browser posts the form itself once the
/// submit handler lets the event through.
#[function_component(UploadPage)]
fn upload_page() -> Html {
    let upload = use_upload_form();
    let form = &upload.form;

    html! {
        <div class="container">
            <h1>{ "Upload Slab Image" }</h1>
            <form
                action={SUBMIT_ENDPOINT}
                method={SUBMIT_METHOD}
                enctype={SUBMIT_ENCTYPE}
                novalidate=true
                onsubmit={upload.on_submit.clone()}
            >
                <ValidationSummary errors={upload.errors.clone()} />

                <ImageField
                    image={form.image.clone()}
                    errors={upload.errors.clone()}
                    onchange={upload.on_image_change.clone()}
                />

                <ThicknessField
                    selection={form.selection.clone()}
                    preset={upload.preset_display}
                    errors={upload.errors.clone()}
                    on_preset_change={upload.on_preset_change.clone()}
                    on_value_input={upload.on_thickness_input.clone()}
                    on_unit_change={upload.on_unit_change.clone()}
                />

                <NotesField
                    notes={form.notes.clone()}
                    oninput={upload.on_notes_input.clone()}
                />

                <TermsField
                    accepted={form.terms_accepted}
                    errors={upload.errors.clone()}
                    onchange={upload.on_terms_change.clone()}
                />

                <button type="submit" class="submit-button">{ "Upload & Process" }</button>
            </form>
        </div>
    }
}

#[function_component]
pub fn App() -> Html {
    html! { <UploadPage /> }
}

/// Entry point: installs panic/log hooks and renders the App.
fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = logger::init(LOG_LEVEL) {
        web_sys::console::error_1(&format!("Logger init failed: {}", err).into());
    }
    yew::Renderer::<App>::new().render();
}
