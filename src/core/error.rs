use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid value {value:?} for field {field}")]
    InvalidInput { field: String, value: String },

    #[error("Unknown civilization field: {0}")]
    UnknownField(String),

    #[error("Initial values can only be edited while paused and at peace")]
    NotEditable,

    #[error("Simulation halted: {extinct} went extinct")]
    SimulationHalted { extinct: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
