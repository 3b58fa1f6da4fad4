//! Logger setup shared by the CLI and the wasm module.
//!
//! Generation and tokenizing log at `debug!`, unlock and lockout at `info!`.
//! Natively the default level is `Warn` so a rendered terminal
//! is not interleaved with log lines; `--play` sessions can opt in through
//! `HACKTERM_LOG` (checked first) or `RUST_LOG`.

use log::LevelFilter;

/// Environment variable holding `env_logger` filter directives for hackterm.
pub const LOG_ENV: &str = "HACKTERM_LOG";

/// Level used when no filter directives are set.
#[must_use]
pub fn default_level(debug_enabled: bool) -> LevelFilter {
    match (debug_enabled, cfg!(target_arch = "wasm32")) {
        (true, _) => LevelFilter::Debug,
        (false, true) => LevelFilter::Info,
        (false, false) => LevelFilter::Warn,
    }
}

/// Pick the filter directives to apply: `HACKTERM_LOG` wins over `RUST_LOG`,
/// blank values count as unset.
fn pick_filters(hackterm: Option<String>, rust: Option<String>) -> Option<String> {
    [hackterm, rust].into_iter().flatten().find(|s| !s.trim().is_empty())
}

/// Initialize logging for hackterm. Calling it twice keeps the first logger.
pub fn init_logger(debug_enabled: bool) {
    let level = default_level(debug_enabled);

    #[cfg(target_arch = "wasm32")]
    {
        let wasm_level = level.to_level().unwrap_or(log::Level::Info);
        if let Err(e) = console_log::init_with_level(wasm_level) {
            let msg = format!("hackterm: console logger unavailable: {e}");
            web_sys::console::error_1(&msg.into());
            return;
        }
        log::info!("console logger at {wasm_level:?}");
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::env;
        use std::io::Write;

        let mut builder = env_logger::Builder::new();
        builder
            .filter(None, level)
            .format(|buf, record| writeln!(buf, "[{:<5} {}] {}", record.level(), record.target(), record.args()));

        if let Some(filters) = pick_filters(env::var(LOG_ENV).ok(), env::var("RUST_LOG").ok()) {
            builder.parse_filters(&filters);
        }

        if builder.try_init().is_ok() {
            log::debug!("logger at {level:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_default_level() {
        assert_eq!(default_level(true), LevelFilter::Debug);
        assert_eq!(default_level(false), LevelFilter::Warn);
    }

    #[test]
    fn test_hackterm_filters_win() {
        let picked = pick_filters(Some("hackterm=debug".to_string()), Some("info".to_string()));
        assert_eq!(picked.as_deref(), Some("hackterm=debug"));
    }

    #[test]
    fn test_blank_filters_ignored() {
        assert_eq!(pick_filters(Some("  ".to_string()), Some("info".to_string())).as_deref(), Some("info"));
        assert_eq!(pick_filters(None, Some(String::new())), None);
        assert_eq!(pick_filters(None, None), None);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logger(false);
        init_logger(true);
    }
}
