use crate::config::TerminalConfig;
use crate::errors::ConfigError;
use crate::generator::GenerateError;
use crate::grid::{Row, chunk_rows};
use crate::log::init_logger;
use crate::terminal::{TerminalError, likeness};
use crate::tokenizer::{Region, Span, tokenize};
use crate::word_list::{WordList, WordPool};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "E001", "T003")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<&ConfigError> for WasmError {
    fn from(e: &ConfigError) -> Self {
        WasmError {
            code: e.code().to_string(),
            message: e.to_string(),
            description: e.description().to_string(),
            details: e.details().to_string(),
            help: e.help().map(str::to_string),
        }
    }
}

impl From<&GenerateError> for WasmError {
    fn from(e: &GenerateError) -> Self {
        // report the underlying config problem, not the wrapper
        match e {
            GenerateError::InvalidConfig(ce) => WasmError::from(ce.as_ref()),
            _ => WasmError {
                code: e.code().to_string(),
                message: e.to_string(),
                description: e.description().to_string(),
                details: e.details().to_string(),
                help: e.help().map(str::to_string),
            },
        }
    }
}

impl From<TerminalError> for WasmError {
    fn from(e: TerminalError) -> Self {
        match &e {
            TerminalError::InvalidConfig(ce) => WasmError::from(ce.as_ref()),
            TerminalError::NoSolution(ge) => WasmError::from(ge),
            _ => WasmError {
                code: e.code().to_string(),
                message: e.to_string(),
                description: e.description().to_string(),
                details: e.details().to_string(),
                help: e.help().map(str::to_string),
            },
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        // Format a comprehensive error message
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        // Create a JavaScript Error object with the formatted message
        js_sys::Error::new(&msg).into()
    }
}

/// Initialize hackterm logging with the specified debug setting.
///
/// # Arguments
/// * `debug_enabled` - If true, use Debug log level; if false, use Info log level
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("WASM module initialized");
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct WasmTerminal<'a> {
    text: &'a str,
    placed_words: Vec<String>,
    solution: &'a str,
    rows: Vec<Row<'a>>,
    spans: &'a [Span],
    regions: &'a [Region],
}

fn serialization_error(e: &serde_wasm_bindgen::Error) -> WasmError {
    WasmError {
        code: "WASM002".to_string(),
        message: format!("serialization failed: {e}"),
        description: "Failed to serialize result".to_string(),
        details: "The generated terminal could not be converted to JavaScript format.".to_string(),
        help: Some("This is an internal error. Please report this issue.".to_string()),
    }
}

/// JS entry: (words: string[], seed?: number)
/// returns `{ text, placedWords, solution, rows, spans, regions }` for the default grid
#[wasm_bindgen]
pub fn generate_terminal(words: JsValue, seed: Option<u32>) -> Result<JsValue, JsValue> {
    let words: Vec<String> = serde_wasm_bindgen::from_value(words).map_err(|e| WasmError {
        code: "WASM001".to_string(),
        message: format!("words must be string[]: {e}"),
        description: "Invalid word-list format".to_string(),
        details: "The words parameter must be a JavaScript array of strings.".to_string(),
        help: Some("Ensure you're passing a valid string array, e.g., ['frost', 'ghost', 'froze']".to_string()),
    })?;
    let list = WordList::new(&words).map_err(|ce| WasmError::from(ce.as_ref()))?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(u64::from(seed)),
        None => StdRng::from_entropy(),
    };
    let config = TerminalConfig::default();
    let mut pool = WordPool::from_list(&list);
    let message = crate::generator::generate(&mut pool, &config.palette, config.total_length(), config.min_gap, &mut rng)
        .map_err(|ge| WasmError::from(&ge))?;
    let solution = message.solution().map_err(|ge| WasmError::from(&ge))?;

    let rows = chunk_rows(message.text(), config.grid.chars_per_row);
    let placed_words = message.placed_words();
    let tokens = tokenize(&rows, &config.channels, &placed_words, config.tokenizer);

    let result = WasmTerminal {
        text: message.text(),
        placed_words,
        solution,
        rows,
        spans: tokens.spans(),
        regions: tokens.regions(),
    };
    serde_wasm_bindgen::to_value(&result).map_err(|e| serialization_error(&e).into())
}

/// JS entry: likeness of two equal-length words.
#[wasm_bindgen]
pub fn likeness_wasm(candidate: &str, solution: &str) -> Result<usize, JsValue> {
    likeness(candidate, solution).map_err(|e| WasmError::from(e).into())
}

/// Generate a debug report for troubleshooting.
///
/// The report carries the error message, the word count and the browser
/// environment, so users can paste it into an issue.
#[wasm_bindgen]
pub fn get_debug_info(error_message: &str, word_count: usize, seed: Option<u32>) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // NB: writing to a String never fails (infallible operation)
    let _ = writeln!(&mut report, "=== HACKTERM DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH"));
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{error_message}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Input");
    let _ = writeln!(&mut report, "Word Count: {word_count}");
    let _ = writeln!(&mut report, "Seed: {}", seed.map_or_else(|| "random".to_string(), |s| s.to_string()));
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Environment");
    if let Some(window) = web_sys::window() {
        if let Ok(user_agent) = window.navigator().user_agent() {
            let _ = writeln!(&mut report, "User Agent: {user_agent}");
        }
        let _ = writeln!(&mut report, "Location: {}", window.location().href().unwrap_or_else(|_| "unknown".to_string()));
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}
