use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing URL (set --url or provide `target` in config).")]
    MissingUrl,
    #[error("Invalid header format: '{value}'. Expected 'Key: Value'")]
    InvalidHeaderFormat { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid duration unit '{unit}' in '{value}'. Use ms, s, m, or h.")]
    InvalidDurationUnit { value: String, unit: String },
    #[error("Duration '{value}' overflows.")]
    DurationOverflow { value: String },
    #[error("Value must be >= 1.")]
    ValueMustBePositive,
    #[error("Invalid number '{value}': {source}")]
    InvalidNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid target URL '{url}': {source}")]
    InvalidTargetUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{field} must be greater than zero.")]
    MustBePositive { field: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
