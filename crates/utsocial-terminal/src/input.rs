use rustyline::error::ReadlineError;

/// One answer from a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C: abandon whatever the prompt was collecting.
    Interrupted,
    /// Ctrl-D: the user is done.
    Eof,
}

impl Input {
    /// Sorts a rustyline result into an answer. Other readline failures are
    /// terminal errors and stay errors.
    pub fn from_readline(result: Result<String, ReadlineError>) -> Result<Self, ReadlineError> {
        match result {
            Ok(line) => Ok(Self::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Self::Interrupted),
            Err(ReadlineError::Eof) => Ok(Self::Eof),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_is_not_an_empty_line() {
        let input = Input::from_readline(Err(ReadlineError::Interrupted)).unwrap();
        assert_eq!(input, Input::Interrupted);
        assert_ne!(input, Input::Line(String::new()));
    }

    #[test]
    fn test_ctrl_d_ends_input() {
        assert_eq!(
            Input::from_readline(Err(ReadlineError::Eof)).unwrap(),
            Input::Eof
        );
    }

    #[test]
    fn test_typed_line_is_kept_verbatim() {
        assert_eq!(
            Input::from_readline(Ok("  pw 123 ".to_string())).unwrap(),
            Input::Line("  pw 123 ".to_string())
        );
    }

    #[test]
    fn test_io_failure_stays_an_error() {
        let err = ReadlineError::Io(std::io::Error::other("tty gone"));
        assert!(Input::from_readline(Err(err)).is_err());
    }
}
