//! Common utilities module
//!
//! This module contains the error type and pixel type tags shared by every transform.

pub mod error;
pub mod pixel;

pub use error::{ProcessingError, Result};
pub use pixel::{Pixel, PixelBuffer, PixelType};
