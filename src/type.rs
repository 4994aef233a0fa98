use std::fmt::Debug;

use num_traits::Float;

use crate::error::{KDTreeError, Result};
use crate::kdtree::constants::KDTREE_MAGIC;

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Distances are computed in
/// the coordinate type itself, so only floating point types are supported, and each type has a
/// fixed tag and width in the model file format.
pub trait IndexableNum: private::Sealed + Float + Debug + Send + Sync + 'static {
    /// The type index written into the model header
    const TYPE_INDEX: u8;
    /// The number of bytes per element
    const BYTES_PER_ELEMENT: usize;

    /// Append the little-endian encoding of this value.
    fn write_le(self, out: &mut Vec<u8>);

    /// Decode a value from exactly [`Self::BYTES_PER_ELEMENT`] little-endian bytes.
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_indexable_num {
    ($t:ty, $type_index:expr) => {
        impl IndexableNum for $t {
            const TYPE_INDEX: u8 = $type_index;
            const BYTES_PER_ELEMENT: usize = std::mem::size_of::<$t>();

            #[inline]
            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }

            #[inline]
            fn read_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(bytes);
                <$t>::from_le_bytes(buf)
            }
        }
    };
}

impl_indexable_num!(f32, 7);
impl_indexable_num!(f64, 8);

/// An enum over the allowed coordinate types in a model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordType {
    Float32,
    Float64,
}

impl CoordType {
    /// Infer the CoordType from an existing model buffer.
    ///
    /// This can be used to discern the generic type to use when loading a [`KDTree`] of unknown
    /// provenance.
    ///
    /// [`KDTree`]: crate::kdtree::KDTree
    pub fn from_buffer<T: AsRef<[u8]>>(data: &T) -> Result<Self> {
        let data = data.as_ref();
        if data.len() < 2 || data[0] != KDTREE_MAGIC {
            return Err(KDTreeError::Corrupt(
                "Data not in k-d tree model format.".to_string(),
            ));
        }

        let version_and_type = data[1];
        let type_ = version_and_type & 0x0f;
        let result = match type_ {
            f32::TYPE_INDEX => CoordType::Float32,
            f64::TYPE_INDEX => CoordType::Float64,
            t => return Err(KDTreeError::Corrupt(format!("Unexpected type {}.", t))),
        };
        Ok(result)
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
