use thiserror::Error;

/// Top-level error type for a hole placement pass.
#[derive(Debug, Error)]
pub enum PierceError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("run '{run}' has no diameter and no complete width/height pair")]
    MissingDimension { run: String },

    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("target not found: {0}")]
    TargetNotFound(String),

    #[error("ray cast failed: {0}")]
    RayCast(String),

    #[error("model change rejected: {0}")]
    Mutation(String),
}

/// Errors detected before any geometry work begins.
///
/// The `Display` text is the reason reported to the user when a pass aborts.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no companion model with '{marker}' in its title is open")]
    ModelNotFound { marker: String },

    #[error("no {category} symbol of family '{family}' found")]
    SymbolNotFound { category: String, family: String },

    #[error("no non-template 3D view found")]
    ViewNotFound,
}

/// Errors related to geometric inputs.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("segment length {0} is negative or not finite")]
    InvalidLength(f64),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Convenience type alias for results using [`PierceError`].
pub type Result<T> = std::result::Result<T, PierceError>;
