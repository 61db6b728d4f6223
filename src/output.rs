use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `RELIGI_QUIET=1` suppresses informational CLI output
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("RELIGI_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}
