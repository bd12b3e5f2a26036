//! UniFFI bindings crate for the mailsearch library
//!
//! This crate wraps the mailsearch crate for UniFFI library mode binding
//! generation. It re-exports the FFI module and UniFFI scaffolding.
//!
//! ## Building for a Python host
//!
//! 1. Build the shared library:
//!    ```bash
//!    cargo build --release -p mailsearch-ffi
//!    ```
//!
//! 2. Generate Python bindings:
//!    ```bash
//!    cargo run -p mailsearch-ffi --features bindgen --bin uniffi-bindgen generate \
//!        --library target/release/libmailsearch_ffi.so \
//!        --language python \
//!        --out-dir generated/python
//!    ```
//!
//! 3. Ship `libmailsearch_ffi.so` next to the generated `mailsearch_ffi.py`

// Re-export everything from the mailsearch crate's FFI module
pub use mailsearch::ffi::*;

// Re-export the uniffi scaffolding from the mailsearch crate
// This is needed for library mode to work correctly
mailsearch::uniffi_reexport_scaffolding!();
