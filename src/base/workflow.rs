//! GitHub Actions workflow commands.
//!
//! A failed run is reported to the runner with an `::error::` command on stdout.

/// Format an `::error::` workflow command for `message`.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Escape command data so multi-line messages survive the runner's parser.
fn escape_data(value: &str) -> String {
    value.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_command_escapes_newlines_and_percent() {
        assert_eq!(error_command("boom"), "::error::boom");
        assert_eq!(error_command("50% done\r\nthen failed"), "::error::50%25 done%0D%0Athen failed");
    }
}
