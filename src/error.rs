use crate::{frc::FrcError, preprocess::PreprocessError, shape::ShapeError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `frc` module")]
    Frc(#[from] FrcError),
    #[error("Error in the `preprocess` module")]
    Preprocess(#[from] PreprocessError),
    #[error("Unsupported array shape")]
    Shape(#[from] ShapeError),
    #[cfg(feature = "plot")]
    #[error("Error in the `plot` module")]
    Plot(#[from] crate::plot::PlotError),
}
pub type Result<T> = std::result::Result<T, Error>;
