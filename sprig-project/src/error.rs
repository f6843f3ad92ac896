use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for sprig-project operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("no tsconfig.json found in '{dir}'")]
    #[diagnostic(
        code(sprig::config_not_found),
        help("run this command from the root directory of your project")
    )]
    ConfigNotFound { dir: PathBuf },

    #[error("failed to parse '{path}'")]
    #[diagnostic(code(sprig::config_parse))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read '{path}'")]
    #[diagnostic(code(sprig::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read template '{path}'")]
    #[diagnostic(
        code(sprig::template_read),
        help("check that the template file exists and is valid UTF-8")
    )]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a config-not-found error for a project directory
    pub fn config_not_found(dir: impl Into<PathBuf>) -> Box<Self> {
        Box::new(Error::ConfigNotFound { dir: dir.into() })
    }

    /// Create a parse error for a configuration file
    pub fn config_parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Box<Self> {
        Box::new(Error::ConfigParse {
            path: path.into(),
            source,
        })
    }

    /// Create an io error for a source file read
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Create a template read error
    pub fn template_read(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::TemplateRead {
            path: path.into(),
            source,
        })
    }
}
