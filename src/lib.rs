// Reusable library API — visible to both CLI and WASM builds
pub mod config;
pub mod errors;
pub mod generator;
pub mod glyph;
pub mod grid;
pub mod log;
pub mod palette;
pub mod random;
pub mod terminal;
pub mod tokenizer;
pub mod word_list;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
