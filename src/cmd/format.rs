/*!
format.rs

Human output helpers for the `supershell` CLI.

Goals:
  - Consistent color / glyph styling for confirmations and errors.
  - Degrade gracefully: NO_COLOR disables ANSI, NO_EMOJI disables glyphs, and
    both are off when the stream is not a terminal.
  - Record lines (`list`, `get`) are plain tab-separated text and never styled,
    so they stay grep/cut friendly.

Public API Summary:
  - StyleOptions::stdout() / StyleOptions::stderr()
  - color(role, text, &StyleOptions) -> String
  - emoji(tag, &StyleOptions) -> &'static str
  - summary_line(&Record) / detail_lines(&Record) / mask(secret)
*/

use std::io::IsTerminal;

use crate::store::Record;

/* -------------------------------------------------------------------------- */
/* Style Options                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
}

impl StyleOptions {
    pub fn stdout() -> Self {
        Self::detect(std::io::stdout().is_terminal())
    }

    pub fn stderr() -> Self {
        Self::detect(std::io::stderr().is_terminal())
    }

    fn detect(is_tty: bool) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let no_emoji = std::env::var_os("NO_EMOJI").is_some();
        StyleOptions {
            use_color: is_tty && !no_color,
            use_emoji: is_tty && !no_emoji,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Color / Emoji                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Success,
    Warning,
    Error,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",  // cyan-ish
        Role::Success => "38;5;82",  // green
        Role::Warning => "38;5;214", // orange
        Role::Error => "38;5;196",   // red
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✔ ",
        "error" => "✖ ",
        "warn" => "⚠ ",
        "info" => "ℹ ",
        "rocket" => "🚀 ",
        _ => "",
    }
}

/// `✔ added 'web1'` style confirmation.
pub fn status_line(tag: &str, role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    format!("{}{}", emoji(tag, style), color(role, text, style))
}

/* -------------------------------------------------------------------------- */
/* Record rendering                                                           */
/* -------------------------------------------------------------------------- */

/// `<nickname>\t<user>@<host>:<port>\t<auth>`
pub fn summary_line(record: &Record) -> String {
    format!(
        "{}\t{}\t{}",
        record.nickname,
        record.address(),
        record.auth_method
    )
}

/// Summary plus the active credential (password masked).
pub fn detail_lines(record: &Record) -> Vec<String> {
    let mut lines = vec![summary_line(record)];
    if let Some(key) = record.active_key_path() {
        lines.push(format!("key:\t{key}"));
    }
    if let Some(pw) = record.active_password() {
        lines.push(format!("password:\t{}", mask(pw)));
    }
    lines
}

/// One `*` per byte of the secret.
pub fn mask(secret: &str) -> String {
    "*".repeat(secret.len())
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                       */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AuthMethod;

    fn web1(auth: AuthMethod) -> Record {
        Record {
            nickname: "web1".into(),
            host: "10.0.0.5".into(),
            port: 22,
            user: "alice".into(),
            auth_method: auth,
            key_path: "/tmp/id".into(),
            password: "päss".into(),
        }
    }

    #[test]
    fn plain_style_is_passthrough() {
        let style = StyleOptions {
            use_color: false,
            use_emoji: false,
        };
        assert_eq!(color(Role::Error, "boom", &style), "boom");
        assert_eq!(emoji("success", &style), "");
        assert_eq!(status_line("success", Role::Success, "added", &style), "added");
    }

    #[test]
    fn colored_wraps_in_ansi() {
        let style = StyleOptions {
            use_color: true,
            use_emoji: true,
        };
        let s = color(Role::Success, "ok", &style);
        assert!(s.starts_with("\x1b[38;5;82m"));
        assert!(s.ends_with("\x1b[0m"));
        assert_eq!(emoji("unknown-tag", &style), "");
    }

    #[test]
    fn summary_is_tab_separated() {
        assert_eq!(
            summary_line(&web1(AuthMethod::Key)),
            "web1\talice@10.0.0.5:22\tkey"
        );
    }

    #[test]
    fn key_detail() {
        assert_eq!(
            detail_lines(&web1(AuthMethod::Key)),
            vec!["web1\talice@10.0.0.5:22\tkey", "key:\t/tmp/id"]
        );
    }

    #[test]
    fn password_detail_is_masked() {
        let lines = detail_lines(&web1(AuthMethod::Password));
        assert_eq!(lines[1], "password:\t*****");
        assert!(lines.iter().all(|l| !l.contains("päss")));
    }

    #[test]
    fn mask_counts_bytes() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask("päss"), "*****");
    }
}
