//! SZMC e-library adapter.

mod dto;
mod http_library;

pub use http_library::{HttpMedicalLibrary, LibraryCredentials};
