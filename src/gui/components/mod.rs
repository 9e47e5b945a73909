// src/gui/components/mod.rs
pub mod document_view;
pub mod toolbar;
