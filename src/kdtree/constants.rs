/// Magic byte at the start of every model file.
pub(crate) const KDTREE_MAGIC: u8 = 0x6b;

/// Model format version, stored in the high nibble of the second header byte.
pub(crate) const KDTREE_VERSION: u8 = 1;

/// Bytes in the fixed model header.
pub(crate) const KDTREE_HEADER_SIZE: usize = 8;

/// Bytes in the little-endian length prefix of each node record.
pub(crate) const RECORD_LENGTH_SIZE: usize = 8;
