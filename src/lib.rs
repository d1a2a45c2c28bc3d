//! inkframe - photo frame server for six-color e-paper panels
//!
//! Pulls photos from an Immich album, renders them for the panel with
//! `spectra_dither` and hands the frame to the panel client over HTTP.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
