use std::error::Error;
use std::fmt::Display;
use std::path::PathBuf;

#[derive(Debug)]
pub struct ValidationError {
    field: &'static str,
    msg: String,
}

impl ValidationError {
    pub fn for_field(field: &'static str, msg: &str) -> Self {
        ValidationError {
            field,
            msg: String::from(msg),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }
}

impl Error for ValidationError {}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid value for {}: {}", self.field, self.msg)
    }
}

#[derive(Debug)]
pub struct InvalidArgument {
    msg: String,
}

impl InvalidArgument {
    pub fn new(msg: &str) -> Self {
        InvalidArgument {
            msg: String::from(msg),
        }
    }
}

impl Error for InvalidArgument {}

impl Display for InvalidArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid argument: {}", self.msg)
    }
}

#[derive(Debug)]
pub struct InvalidState {
    msg: String,
}

impl InvalidState {
    pub fn new(msg: &str) -> Self {
        InvalidState {
            msg: String::from(msg),
        }
    }
}

impl Error for InvalidState {}

impl Display for InvalidState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid state: {}", self.msg)
    }
}

#[derive(Debug)]
pub struct ProbeError {
    path: PathBuf,
    msg: String,
}

impl ProbeError {
    pub fn for_file(path: &PathBuf, msg: &str) -> Self {
        ProbeError {
            path: PathBuf::from(path),
            msg: String::from(msg),
        }
    }
}

impl Error for ProbeError {}

impl Display for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error probing {:?}: {}", &self.path, &self.msg)
    }
}

/// Terminal failure of the external engine: non-zero exit, a crash, or a
/// process that could not be started at all.
#[derive(Debug)]
pub struct ConversionError {
    path: PathBuf,
    exit_code: Option<i32>,
    tail: Vec<String>,
}

impl ConversionError {
    pub fn for_file(path: &PathBuf, exit_code: Option<i32>, tail: Vec<String>) -> Self {
        ConversionError {
            path: PathBuf::from(path),
            exit_code,
            tail,
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn tail(&self) -> &[String] {
        &self.tail
    }
}

impl Error for ConversionError {}

impl Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.exit_code {
            Some(code) => write!(f, "Error converting {:?}: engine exited with {}", &self.path, code),
            None => write!(f, "Error converting {:?}: engine did not exit normally", &self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let err = ValidationError::for_field("samplerate", "must be greater than zero");
        assert_eq!(err.field(), "samplerate");
        assert!(format!("{}", err).contains("samplerate"));
    }

    #[test]
    fn test_conversion_error_display() {
        let err = ConversionError::for_file(&PathBuf::from("/videos/clip.mov"), Some(2), vec![]);
        assert!(format!("{}", err).contains("exited with 2"));
        assert_eq!(err.exit_code(), Some(2));
    }
}
