//! Terminal output utilities.
//!
//! Renders status replies for the `status` and `listen` commands.

use crate::models::StatusReply;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// One-line summary: state badge, addresses, message.
pub fn format_status(reply: &StatusReply) -> String {
    let badge = if reply.conflict != 0 {
        "CONFLICT".on_red().to_string()
    } else {
        "OK".green().to_string()
    };
    format!(
        "{badge} wan={} lan={} {}",
        format_field(&reply.wan_ip, 17),
        format_field(&reply.lan_ip, 17),
        reply.message
    )
}
