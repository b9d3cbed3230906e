/// Problems found while parsing or rendering a reStructuredText document.
///
/// Every variant carries the 1-based source line it was detected on. Only
/// severe problems abort a render; the rest are reported in the document
/// as system messages and collected in [`crate::Parts::messages`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RstError {
    #[error("Title level inconsistent at line {line}: {title:?}")]
    InconsistentTitleLevel { line: usize, title: String },

    #[error("Title underline too short at line {line}: {title:?}")]
    TitleUnderlineTooShort { line: usize, title: String },

    #[error("Undefined substitution referenced at line {line}: |{name}|")]
    UndefinedSubstitution { line: usize, name: String },

    #[error("Unknown target name at line {line}: {name:?}")]
    UnknownTarget { line: usize, name: String },

    #[error("Unknown directive type at line {line}: {name:?}")]
    UnknownDirective { line: usize, name: String },

    #[error("Error in {name:?} directive at line {line}: {message}")]
    DirectiveError {
        line: usize,
        name: String,
        message: String,
    },

    #[error("Duplicate substitution definition at line {line}: |{name}|")]
    DuplicateSubstitution { line: usize, name: String },

    #[error("Invalid character code at line {line}: {code:?}")]
    InvalidCharacterCode { line: usize, code: String },
}

pub type Result<T> = std::result::Result<T, RstError>;

/// Severity of a problem, numbered as docutils numbers its reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Warning = 2,
    Error = 3,
    Severe = 4,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Severe => "SEVERE",
        }
    }
}

impl RstError {
    /// Line the error was reported on
    pub fn line(&self) -> usize {
        match self {
            RstError::InconsistentTitleLevel { line, .. }
            | RstError::TitleUnderlineTooShort { line, .. }
            | RstError::UndefinedSubstitution { line, .. }
            | RstError::UnknownTarget { line, .. }
            | RstError::UnknownDirective { line, .. }
            | RstError::DirectiveError { line, .. }
            | RstError::DuplicateSubstitution { line, .. }
            | RstError::InvalidCharacterCode { line, .. } => *line,
        }
    }

    pub fn level(&self) -> Level {
        match self {
            RstError::InconsistentTitleLevel { .. } => Level::Severe,
            RstError::TitleUnderlineTooShort { .. } => Level::Warning,
            _ => Level::Error,
        }
    }

    /// Severe problems stop the render instead of being reported inline
    pub fn is_severe(&self) -> bool {
        self.level() == Level::Severe
    }

    /// Message body as shown inside a rendered system message
    pub fn description(&self) -> String {
        match self {
            RstError::InconsistentTitleLevel { title, .. } => {
                format!("Title level inconsistent: {:?}.", title)
            }
            RstError::TitleUnderlineTooShort { .. } => "Title underline too short.".to_string(),
            RstError::UndefinedSubstitution { name, .. } => {
                format!("Undefined substitution referenced: \"{}\".", name)
            }
            RstError::UnknownTarget { name, .. } => format!("Unknown target name: \"{}\".", name),
            RstError::UnknownDirective { name, .. } => {
                format!("Unknown directive type \"{}\".", name)
            }
            RstError::DirectiveError { name, message, .. } => {
                format!("Error in \"{}\" directive:\n{}", name, message)
            }
            RstError::DuplicateSubstitution { name, .. } => {
                format!("Duplicate substitution definition name: \"{}\".", name)
            }
            RstError::InvalidCharacterCode { code, .. } => {
                format!("Invalid character code: {}", code)
            }
        }
    }

    /// Re-base the reported line after `prelude_lines` lines were prepended
    /// to the document before parsing.
    pub fn shift_lines(mut self, prelude_lines: usize) -> Self {
        let line = match &mut self {
            RstError::InconsistentTitleLevel { line, .. }
            | RstError::TitleUnderlineTooShort { line, .. }
            | RstError::UndefinedSubstitution { line, .. }
            | RstError::UnknownTarget { line, .. }
            | RstError::UnknownDirective { line, .. }
            | RstError::DirectiveError { line, .. }
            | RstError::DuplicateSubstitution { line, .. }
            | RstError::InvalidCharacterCode { line, .. } => line,
        };
        *line = line.saturating_sub(prelude_lines);
        self
    }
}
