//! Error macros for weekly-review

/// Macro for returning invalid input errors
#[macro_export]
macro_rules! bail_invalid {
    ($msg:expr) => {
        return Err($crate::error::ReviewError::invalid_input($msg))
    };
}

/// Macro for returning usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::ReviewError::UsageError($msg.to_string()))
    };
}

/// Macro for returning LLM errors
#[macro_export]
macro_rules! bail_llm {
    ($($arg:tt)*) => {
        return Err($crate::error::ReviewError::Llm(format!($($arg)*)))
    };
}
