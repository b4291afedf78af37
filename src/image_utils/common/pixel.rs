//! Pixel element types
//!
//! `PixelType` is the explicit tag for the element type of an image, `Pixel`
//! ties each supported Rust scalar to its tag, and `PixelBuffer` stores a flat
//! buffer of any supported type for code that dispatches at runtime.

/// Element type of an image, named the way OME-XML names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelType {
    Uint8,
    Int8,
    Uint16,
    Int16,
    Uint32,
    Int32,
    Float,
    Double,
}

impl PixelType {
    /// Value of the OME `Pixels/@Type` attribute.
    pub fn ome_name(self) -> &'static str {
        match self {
            PixelType::Uint8 => "uint8",
            PixelType::Int8 => "int8",
            PixelType::Uint16 => "uint16",
            PixelType::Int16 => "int16",
            PixelType::Uint32 => "uint32",
            PixelType::Int32 => "int32",
            PixelType::Float => "float",
            PixelType::Double => "double",
        }
    }

    pub fn bytes_per_sample(self) -> usize {
        match self {
            PixelType::Uint8 | PixelType::Int8 => 1,
            PixelType::Uint16 | PixelType::Int16 => 2,
            PixelType::Uint32 | PixelType::Int32 | PixelType::Float => 4,
            PixelType::Double => 8,
        }
    }
}

/// Flat pixel storage tagged with its element type.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl PixelBuffer {
    pub fn pixel_type(&self) -> PixelType {
        match self {
            PixelBuffer::U8(_) => PixelType::Uint8,
            PixelBuffer::I8(_) => PixelType::Int8,
            PixelBuffer::U16(_) => PixelType::Uint16,
            PixelBuffer::I16(_) => PixelType::Int16,
            PixelBuffer::U32(_) => PixelType::Uint32,
            PixelBuffer::I32(_) => PixelType::Int32,
            PixelBuffer::F32(_) => PixelType::Float,
            PixelBuffer::F64(_) => PixelType::Double,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PixelBuffer::U8(v) => v.len(),
            PixelBuffer::I8(v) => v.len(),
            PixelBuffer::U16(v) => v.len(),
            PixelBuffer::I16(v) => v.len(),
            PixelBuffer::U32(v) => v.len(),
            PixelBuffer::I32(v) => v.len(),
            PixelBuffer::F32(v) => v.len(),
            PixelBuffer::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A scalar that can be stored in an image handled by this crate.
pub trait Pixel: Copy + Default + PartialOrd + Send + Sync + 'static {
    const PIXEL_TYPE: PixelType;

    fn to_f64(self) -> f64;

    /// Converts a label index with `as` semantics, so out-of-range labels wrap.
    fn from_label(label: usize) -> Self;

    fn into_buffer(data: Vec<Self>) -> PixelBuffer;
}

macro_rules! impl_pixel {
    ($ty:ty, $tag:ident, $variant:ident) => {
        impl Pixel for $ty {
            const PIXEL_TYPE: PixelType = PixelType::$tag;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_label(label: usize) -> Self {
                label as $ty
            }

            fn into_buffer(data: Vec<Self>) -> PixelBuffer {
                PixelBuffer::$variant(data)
            }
        }
    };
}

impl_pixel!(u8, Uint8, U8);
impl_pixel!(i8, Int8, I8);
impl_pixel!(u16, Uint16, U16);
impl_pixel!(i16, Int16, I16);
impl_pixel!(u32, Uint32, U32);
impl_pixel!(i32, Int32, I32);
impl_pixel!(f32, Float, F32);
impl_pixel!(f64, Double, F64);
