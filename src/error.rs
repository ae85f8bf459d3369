use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

pub type Result<T> = std::result::Result<T, Error>;

type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error carried through every fallible step.
///
/// Each kind owns a stable numeric code so callers can branch on
/// `err.code() == Error::HTTP_ERROR` without matching on message text.
pub struct Error {
    code: u32,
    name: &'static str,
    display_text: String,
    cause: Option<Cause>,
}

impl Error {
    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn message(&self) -> &str {
        &self.display_text
    }

    pub fn create(
        code: u32,
        name: &'static str,
        display_text: String,
        cause: Option<Cause>,
    ) -> Self {
        Self {
            code,
            name,
            display_text,
            cause,
        }
    }

    pub fn set_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Prefix the message with where the error happened, keeping code and cause.
    pub fn add_message(mut self, msg: impl AsRef<str>) -> Self {
        self.display_text = format!("{}: {}", msg.as_ref(), self.display_text);
        self
    }
}

macro_rules! build_exceptions {
    ($($body:ident($const:ident, $code:expr)),* $(,)?) => {
        impl Error {
            $(
                pub const $const: u32 = $code;

                #[allow(non_snake_case)]
                pub fn $body(display_text: impl Into<String>) -> Error {
                    Error::create($code, stringify!($body), display_text.into(), None)
                }
            )*
        }
    };
}

build_exceptions! {
    // startup
    InvalidConfig(INVALID_CONFIG, 2),
    ReadConfigFail(READ_CONFIG_FAIL, 3),
    ParseConfigFail(PARSE_CONFIG_FAIL, 4),
    InitLogError(INIT_LOG_ERROR, 5),

    // filesystem
    InvalidPath(INVALID_PATH, 54),
    IoError(IO_ERROR, 1001),

    // corpus download and extraction
    HttpError(HTTP_ERROR, 2001),
    HttpStatusError(HTTP_STATUS_ERROR, 2002),
    ExtractError(EXTRACT_ERROR, 3001),

    // binary sample
    CopyError(COPY_ERROR, 4001),
    RandomError(RANDOM_ERROR, 4002),

    Unexpected(UNEXPECTED, 9999),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Code: {}, Text = {}.", self.code, self.display_text)?;
        if let Some(cause) = &self.cause {
            write!(f, " Cause: {cause}")?;
        }
        Ok(())
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("message", &self.display_text)
            .field("cause", &self.cause)
            .finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| &**cause as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::IoError(format!("{error}")).set_cause(error)
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        let text = match error.url() {
            Some(url) => format!("request to {url} failed"),
            None => "request failed".to_string(),
        };
        if error.is_status() {
            Error::HttpStatusError(text).set_cause(error)
        } else {
            Error::HttpError(text).set_cause(error)
        }
    }
}

impl From<rand::Error> for Error {
    fn from(error: rand::Error) -> Self {
        Error::RandomError(format!("secure random source failed: {error}")).set_cause(error)
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(error: log::SetLoggerError) -> Self {
        Error::InitLogError(format!("{error}")).set_cause(error)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(error: tokio::task::JoinError) -> Self {
        Error::Unexpected(format!("blocking task did not complete: {error}")).set_cause(error)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    #[test]
    fn test_constructor_sets_code_and_name() {
        let err = Error::ExtractError("bad gzip header");
        assert_eq!(Error::EXTRACT_ERROR, err.code());
        assert_eq!("ExtractError", err.name());
        assert_eq!("bad gzip header", err.message());
    }

    #[test]
    fn test_display_includes_code_and_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::CopyError("copy /bin/ls").set_cause(io);
        let display = format!("{err}");
        assert!(display.contains("Code: 4001"));
        assert!(display.contains("copy /bin/ls"));
        assert!(display.contains("gone"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert_eq!(Error::IO_ERROR, err.code());
    }

    #[test]
    fn test_add_message_keeps_code() {
        let err = Error::HttpStatusError("404 Not Found").add_message("download corpus");
        assert_eq!(Error::HTTP_STATUS_ERROR, err.code());
        assert_eq!("download corpus: 404 Not Found", err.message());
    }

    #[tokio::test]
    async fn test_from_join_error_keeps_cause() {
        let join_error = tokio::task::spawn_blocking::<_, ()>(|| panic!("unpack thread died"))
            .await
            .expect_err("task panicked");
        let err: Error = join_error.into();
        assert_eq!(Error::UNEXPECTED, err.code());
        assert!(err.source().is_some());
    }
}
