//! UniFFI bindgen binary for generating host-language bindings
//!
//! Usage:
//!   cargo run -p mailsearch-ffi --features bindgen --bin uniffi-bindgen generate \
//!       --library target/release/libmailsearch_ffi.so \
//!       --language python \
//!       --out-dir generated/python

fn main() {
    uniffi::uniffi_bindgen_main()
}
