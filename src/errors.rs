use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set. Please add it to your .env file in the project directory.")]
    MissingVariable(String),

    #[error("{0} is set but is not valid unicode")]
    InvalidVariable(String),
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Server error: {0}")]
    Server(u16),

    #[error("Request failed: {0}")]
    Request(u16),

    #[error("Gemini API error {code} ({status}): {message}")]
    Api {
        code: u16,
        status: String,
        message: String,
    },

    #[error("Response contained no text (finish reason: {0})")]
    EmptyResponse(String),
}

#[derive(Error, Debug)]
pub enum ToolSpecError {
    #[error("Duplicate tool name: {0}")]
    DuplicateName(String),

    #[error("The tool name '{0}' is invalid, it must match [a-zA-Z0-9_.-]{{1,64}}")]
    InvalidName(String),
}

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("speech was not intelligible")]
    Unintelligible,

    #[error("recognition service unreachable: {0}")]
    Unavailable(String),

    #[error("could not capture audio: {0}")]
    Capture(String),
}

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("failed to launch {player}: {source}")]
    Launch {
        player: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{player} exited with {status}")]
    Failed {
        player: &'static str,
        status: std::process::ExitStatus,
    },
}
