//! Multipart form construction.

use std::path::Path;

use courier_application::ports::HttpExecutorError;
use courier_domain::{FormDataEntry, FormEntryType};
use reqwest::multipart::{Form, Part};

/// Builds a multipart form from materialized entries.
///
/// File entries carry a path in `value`; the file is read and sent with its
/// file name and a MIME type guessed from the extension.
///
/// # Errors
///
/// Returns `HttpExecutorError::File` if a file cannot be read.
pub async fn build_form(entries: &[FormDataEntry]) -> Result<Form, HttpExecutorError> {
    let mut form = Form::new();

    for entry in entries {
        match entry.entry_type {
            FormEntryType::Text => {
                form = form.text(entry.key.clone(), entry.value.clone());
            }
            FormEntryType::File => {
                let path = Path::new(&entry.value);
                let content = tokio::fs::read(path)
                    .await
                    .map_err(|e| HttpExecutorError::File {
                        path: entry.value.clone(),
                        message: e.to_string(),
                    })?;

                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("file")
                    .to_string();
                let mime_type = mime_guess::from_path(path).first_or_octet_stream();

                let part = Part::bytes(content)
                    .file_name(file_name)
                    .mime_str(mime_type.as_ref())
                    .map_err(|e| HttpExecutorError::InvalidRequest(format!("Invalid MIME type: {e}")))?;

                form = form.part(entry.key.clone(), part);
            }
        }
    }

    Ok(form)
}
