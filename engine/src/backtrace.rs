use failure::Backtrace;
use log::error;
use std::io::{Result as IoResult, Write};

const CAPTURE_DISABLED: &str = "<backtrace capture disabled, set RUST_BACKTRACE=1 to enable>";

/// Writes the current call stack to `out`.
///
/// Capturing is controlled by the `RUST_BACKTRACE` environment variable; when it is disabled a
/// single line saying so is written instead.
pub fn write_backtrace<WriteT: Write>(out: &mut WriteT) -> IoResult<()> {
    writeln!(out, "{}", capture())
}

/// Logs the current call stack at `error` level.
pub fn log_backtrace() {
    error!("Backtrace:\n{}", capture());
}

fn capture() -> String {
    let backtrace = Backtrace::new().to_string();
    if backtrace.trim().is_empty() {
        CAPTURE_DISABLED.to_owned()
    } else {
        backtrace
    }
}

#[cfg(test)]
mod test {
    use super::{write_backtrace, CAPTURE_DISABLED};
    use failure::Backtrace;

    #[test]
    fn test_write_backtrace() {
        let mut out = Vec::new();
        write_backtrace(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));

        if Backtrace::new().to_string().trim().is_empty() {
            assert_eq!(text.trim_end(), CAPTURE_DISABLED);
        } else {
            assert!(!text.contains(CAPTURE_DISABLED));
            assert!(
                text.contains("test_write_backtrace"),
                "missing test frame in:\n{}",
                text
            );
        }
    }
}
