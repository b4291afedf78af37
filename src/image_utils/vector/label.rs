/// Element of a label image. Regions are runs of equal positive values.
pub trait Label: Copy + Send + Sync {
    fn label_value(self) -> f64;
}

/// Boolean images are their own mask with label 1.
impl Label for bool {
    fn label_value(self) -> f64 {
        if self { 1.0 } else { 0.0 }
    }
}

macro_rules! impl_label {
    ($($ty:ty),*) => {
        $(
            impl Label for $ty {
                #[inline]
                fn label_value(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_label!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
