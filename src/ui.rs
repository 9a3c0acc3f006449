use crate::constants::{ERROR_PREFIX, INFO_PREFIX, SUCCESS_PREFIX, WARNING_PREFIX};
use console::style;

/// Console output for humans. Colors are applied only when the terminal
/// supports them; otherwise the same text is printed plain.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    colors: bool,
    quiet: bool,
}

impl Printer {
    pub fn new(colors: bool, quiet: bool) -> Self {
        Self {
            colors: colors && console::colors_enabled(),
            quiet,
        }
    }

    pub fn plain() -> Self {
        Self {
            colors: false,
            quiet: false,
        }
    }

    pub fn colors(&self) -> bool {
        self.colors
    }

    pub fn info(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", self.paint_info(message.as_ref()));
        }
    }

    pub fn success(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", self.paint_success(message.as_ref()));
        }
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{}", self.paint_warning(message.as_ref()));
        }
    }

    pub fn error(&self, message: impl AsRef<str>) {
        eprintln!("{}", self.paint_error(message.as_ref()));
    }

    pub fn header(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", self.paint_header(message.as_ref()));
        }
    }

    pub fn line(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", message.as_ref());
        }
    }

    fn paint_info(&self, message: &str) -> String {
        if self.colors {
            style(message).cyan().to_string()
        } else {
            message.to_string()
        }
    }

    fn paint_success(&self, message: &str) -> String {
        if self.colors {
            format!("{} {}", SUCCESS_PREFIX, style(message).green())
        } else {
            message.to_string()
        }
    }

    fn paint_warning(&self, message: &str) -> String {
        if self.colors {
            format!("{} {}", WARNING_PREFIX, style(message).yellow())
        } else {
            format!("Warning: {}", message)
        }
    }

    fn paint_error(&self, message: &str) -> String {
        if self.colors {
            format!("{} {}", ERROR_PREFIX, style(message).red().bold())
        } else {
            format!("Error: {}", message)
        }
    }

    fn paint_header(&self, message: &str) -> String {
        if self.colors {
            format!("{} {}", INFO_PREFIX, style(message).magenta().bold())
        } else {
            let rule = "=".repeat(60);
            format!("{}\n{}\n{}", rule, message, rule)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_printer_has_no_escapes() {
        let printer = Printer::plain();
        assert!(!printer.colors());
        assert_eq!(printer.paint_info("hello"), "hello");
        assert_eq!(printer.paint_warning("careful"), "Warning: careful");
        assert_eq!(printer.paint_error("boom"), "Error: boom");
        let header = printer.paint_header("Summary");
        assert!(header.starts_with("====="));
        assert!(header.contains("\nSummary\n"));
    }

    #[test]
    fn test_colors_disabled_when_not_requested() {
        assert!(!Printer::new(false, false).colors());
    }
}
