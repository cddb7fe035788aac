//! Plain-text rendering of a session for the terminal.

use leakcheck_core::Severity;
use leakcheck_lookup::SessionState;
use std::fmt::Write;

/// Render `state` as the text shown to the user.
pub fn render_state(state: &SessionState) -> String {
    match state {
        SessionState::Idle => String::new(),
        SessionState::Pending => "Checking...".to_string(),
        SessionState::Failed(e) => format!("Lookup failed: {}", e.user_message()),
        SessionState::Resolved(result) => {
            let mut out = String::new();
            let headline = match result.severity() {
                Severity::Danger => "Breaches found!",
                Severity::Warning => "Breach found",
                Severity::Safe => "Your data is safe",
            };
            out.push_str(headline);
            out.push('\n');

            if result.is_safe() {
                out.push_str("Your data was not found in any known breach.\n");
            } else {
                let _ = writeln!(out, "Matches found: {}", result.match_count());
            }

            if !result.breaches().is_empty() {
                out.push_str("Breaches:\n");
                for breach in result.breaches() {
                    let _ = writeln!(out, "  - {breach}");
                }
            }
            out
        }
    }
}
