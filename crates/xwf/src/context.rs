//! Project context collection
//!
//! The only user-supplied state is the application name. It is either given
//! up front (flag or config) or read from an interactive prompt.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::{Result, ScaffoldError};

/// Prompt shown when asking for the app name
pub const APP_NAME_PROMPT: &str = "What is the name of your app?";

/// Values available while rendering templated files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectContext {
    app_name: String,
}

impl ProjectContext {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

/// Build the project context, prompting on the terminal if no name was supplied
pub fn collect_context(app_name: Option<String>) -> Result<ProjectContext> {
    if let Some(name) = app_name {
        return Ok(ProjectContext::new(name));
    }

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Err(ScaffoldError::Input(
            "stdin is not a terminal; pass --app-name to run non-interactively".to_string(),
        ));
    }

    prompt_app_name(&mut stdin.lock(), &mut io::stdout())
}

/// Ask for the app name on `output` and read one line from `input`
pub fn prompt_app_name<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<ProjectContext> {
    write!(output, "{} ", APP_NAME_PROMPT)
        .and_then(|_| output.flush())
        .map_err(|e| ScaffoldError::Input(e.to_string()))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| ScaffoldError::Input(e.to_string()))?;

    if read == 0 {
        return Err(ScaffoldError::Input("unexpected end of input".to_string()));
    }

    Ok(ProjectContext::new(line.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_supplied_name_skips_prompt() {
        let ctx = collect_context(Some("Given".to_string())).unwrap();
        assert_eq!(ctx.app_name(), "Given");
    }

    #[test]
    fn test_prompt_reads_and_trims() {
        let mut input = Cursor::new("  My App \nignored\n");
        let mut output = Vec::new();

        let ctx = prompt_app_name(&mut input, &mut output).unwrap();

        assert_eq!(ctx.app_name(), "My App");
        assert_eq!(String::from_utf8(output).unwrap(), "What is the name of your app? ");
    }

    #[test]
    fn test_prompt_accepts_empty_line() {
        let mut input = Cursor::new("\n");
        let ctx = prompt_app_name(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(ctx.app_name(), "");
    }

    #[test]
    fn test_prompt_eof_is_input_error() {
        let mut input = Cursor::new("");
        let err = prompt_app_name(&mut input, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, ScaffoldError::Input(_)));
    }
}
