//! Modal overlay (WASM only)
//!
//! The page provides the markup: `#modal` holding `#modal-title`,
//! `#modal-body` and `#modal-button`. This module only fills in text and
//! toggles visibility.

use web_sys::Document;

use crate::game::Modal;

pub const MODAL_ID: &str = "modal";
pub const BUTTON_ID: &str = "modal-button";

pub fn show_modal(document: &Document, modal: &Modal) {
    let Some(root) = document.get_element_by_id(MODAL_ID) else {
        log::warn!("No #{} element, skipping modal", MODAL_ID);
        return;
    };

    if let Some(title) = document.get_element_by_id("modal-title") {
        title.set_text_content(Some(modal.title()));
    }

    if let Some(body) = document.get_element_by_id("modal-body") {
        body.set_text_content(None);
        for line in modal.lines() {
            if let Ok(p) = document.create_element("p") {
                p.set_text_content(Some(&line));
                let _ = body.append_child(&p);
            }
        }
    }

    if let Some(button) = document.get_element_by_id(BUTTON_ID) {
        button.set_text_content(Some(modal.button_label()));
    }

    root.set_class_name("modal");
}

pub fn hide_modal(document: &Document) {
    if let Some(root) = document.get_element_by_id(MODAL_ID) {
        root.set_class_name("hidden");
    }
}
