use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// HTTP or API-level failure
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    /// Local file failure
    #[error("file error: {0}")]
    File(#[from] FileError),
    /// Quiz automation failure
    #[error("quiz error: {0}")]
    Quiz(#[from] QuizError),
    /// Configuration failure
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// HTTP / API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("request to {endpoint} failed: {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// Non-success HTTP status
    #[error("{endpoint} returned HTTP {status}")]
    HttpStatus {
        endpoint: String,
        status: reqwest::StatusCode,
    },
    /// The body carried a truthy `err` flag
    #[error("API exception from {endpoint} - {message}")]
    ApiReported { endpoint: String, message: String },
    /// Body did not match the expected shape
    #[error("failed to parse response from {endpoint}: {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// HTTP status of the failure, if the server answered at all
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// File errors
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON in {path}: {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse TOML in {path}: {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Quiz automation errors
#[derive(Debug, Error)]
pub enum QuizError {
    /// The learn page carried no training session id
    #[error("cannot find training session id for campaign {campaign_id}")]
    SessionNotFound { campaign_id: String },
    /// Every candidate answer of a question is already known to be wrong
    #[error("every answer to question {question_id} has been tried and marked incorrect")]
    AnswersExhausted { question_id: String },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown saved query: {name}")]
    UnknownQuery { name: String },
    #[error("no saved queries configured")]
    NoSavedQueries,
    #[error("--cheat-sheet and --save-cheat-sheet cannot point at the same file")]
    SameCheatSheetPaths,
}

// ========== helper constructors ==========

impl AppError {
    /// Transport failure on `endpoint`
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// File read failure on `path`
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// File write failure on `path`
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// True when the server answered 415 Unsupported Media Type
    pub fn is_unsupported_media_type(&self) -> bool {
        matches!(
            self,
            AppError::Api(api) if api.status() == Some(reqwest::StatusCode::UNSUPPORTED_MEDIA_TYPE)
        )
    }
}

// ========== Result alias ==========

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
