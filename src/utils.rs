use slab_upload::submission::ImageAttachment;
use web_sys::HtmlInputElement;

/// Read the first selected file of a file input as an attachment.
pub fn attachment_from_input(input: &HtmlInputElement) -> Option<ImageAttachment> {
    let file = input.files()?.item(0)?;
    Some(ImageAttachment {
        file_name: file.name(),
        mime_type: file.type_(),
        size_bytes: file.size().max(0.0) as u64,
    })
}

/// Human-readable file size, e.g. "1.5 MB".
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Whether a MIME type can go into the `image` field.
pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}
