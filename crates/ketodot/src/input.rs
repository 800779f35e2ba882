use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Where a tuple document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(arg.to_path_buf())
        }
    }

    /// All sources named on the command line, stdin when none are.
    pub fn from_args(args: &[PathBuf]) -> Vec<Self> {
        if args.is_empty() {
            return vec![Self::Stdin];
        }
        args.iter().map(|arg| Self::from_arg(arg)).collect()
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdin => None,
            Self::File(path) => Some(path),
        }
    }

    pub fn read(&self) -> Result<String, InputError> {
        let read_error = |cause| InputError::Read {
            name: self.to_string(),
            cause,
        };
        match self {
            Self::Stdin => {
                let mut contents = String::new();
                std::io::stdin()
                    .read_to_string(&mut contents)
                    .map_err(read_error)?;
                Ok(contents)
            }
            Self::File(path) => std::fs::read_to_string(path).map_err(read_error),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("stdin"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("could not read {name}: {cause}")]
    Read {
        name: String,
        #[source]
        cause: std::io::Error,
    },
}
