use thiserror::Error;

/// Errors raised around the forecast fetch, configuration and terminal.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Forecast request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WeatherError {
    /// Message suitable for the screen. Details go to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Network(_) | WeatherError::Status { .. } | WeatherError::Parse(_) => {
                "No se ha podido cargar el tiempo."
            }
            WeatherError::Config(_) => "La configuración no es válida.",
            WeatherError::Io(_) => "Error de entrada/salida.",
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for WeatherError {
    fn from(err: toml::de::Error) -> Self {
        WeatherError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failures_share_message() {
        let status = WeatherError::Status {
            status: 503,
            url: "http://localhost/forecast".into(),
        };
        let parse = WeatherError::Parse("expected value".into());
        assert_eq!(status.user_message(), "No se ha podido cargar el tiempo.");
        assert_eq!(parse.user_message(), status.user_message());
    }

    #[test]
    fn test_display_keeps_details() {
        let err = WeatherError::Status {
            status: 404,
            url: "http://localhost/forecast".into(),
        };
        assert_eq!(
            err.to_string(),
            "Forecast request to http://localhost/forecast failed with status 404"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: WeatherError = json_err.into();
        assert!(matches!(err, WeatherError::Parse(_)));
    }
}
