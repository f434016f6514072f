//! CLI enum types for resampling options.

use clap::ValueEnum;

use crate::imageutils::ResampleMethod;

/// Resampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Method {
    Nearest,
    Bilinear,
    #[default]
    Bicubic,
    Lanczos,
}

impl From<Method> for ResampleMethod {
    fn from(m: Method) -> Self {
        match m {
            Method::Nearest => ResampleMethod::Nearest,
            Method::Bilinear => ResampleMethod::Bilinear,
            Method::Bicubic => ResampleMethod::Bicubic,
            Method::Lanczos => ResampleMethod::Lanczos,
        }
    }
}
