//! Preview generation with `FileReader`.

use pipescan_core::{FlowCell, PreviewTicket};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{File, FileReader, ProgressEvent};

use crate::session::SessionFlow;

/// Read `file` as a data URL and hand it to the flow under `ticket`.
///
/// Returns immediately; the flow drops the completion if the operator has
/// picked another file by then.
pub fn read_preview(file: &File, ticket: PreviewTicket, session: SessionFlow) {
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            log::error!("Failed to create FileReader: {:?}", e);
            return;
        }
    };

    let reader_clone = reader.clone();
    let file_name = file.name();
    let onload = Closure::once(move |_: ProgressEvent| {
        match reader_clone.result().ok().and_then(|value| value.as_string()) {
            Some(data_url) => {
                if session.with_flow(|flow| flow.complete_preview(ticket, data_url)) != Some(true) {
                    log::debug!("Preview of {} arrived after a newer selection", file_name);
                }
            }
            None => log::warn!("FileReader returned no data URL for {}", file_name),
        }
    });
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    let onerror = Closure::once(move |_: ProgressEvent| {
        log::error!("Failed to read image for preview");
    });
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    if let Err(e) = reader.read_as_data_url(file) {
        log::error!("Failed to start preview read: {:?}", e);
    }
}
