//! Generates the Swift and Kotlin bindings for `SecretKit`.

fn main() {
    uniffi::uniffi_bindgen_main();
}
