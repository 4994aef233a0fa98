//! Binary model format.
//!
//! A model is an 8 byte header followed by one record per node position of a preorder walk that
//! includes absent children. Each record is a `u64` little-endian byte length and a body:
//!
//! - absent: a single `0` byte;
//! - node: a `1` byte, the point identifier as `u64`, the split axis as `u32`, then the point's
//!   coordinates, all little-endian.
//!
//! The header holds the magic byte, the format version and coordinate type, two reserved bytes and
//! the dimension as `u32`.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use crate::error::{KDTreeError, Result};
use crate::kdtree::constants::{
    KDTREE_HEADER_SIZE, KDTREE_MAGIC, KDTREE_VERSION, RECORD_LENGTH_SIZE,
};
use crate::kdtree::traversal::KDNode;
use crate::kdtree::KDTree;
use crate::point::Point;
use crate::r#type::IndexableNum;

const ABSENT: u8 = 0;
const PRESENT: u8 = 1;

impl<N: IndexableNum> KDTree<N> {
    /// Write this tree to a model file at `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        debug!(
            "saved k-d tree with {} points of dimension {} to {}",
            self.len(),
            self.dim,
            path.display()
        );
        Ok(())
    }

    /// Read a tree from the model file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let tree = Self::read_from(&mut reader)?;
        debug!(
            "loaded k-d tree with {} points of dimension {} from {}",
            tree.len(),
            tree.dim,
            path.display()
        );
        Ok(tree)
    }

    /// Serialize this tree into `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.header()?)?;

        let mut record = Vec::with_capacity(node_record_len::<N>(self.dim) as usize);
        for node in self.preorder() {
            record.clear();
            encode_record(node, &mut record);
            writer.write_all(&(record.len() as u64).to_le_bytes())?;
            writer.write_all(&record)?;
        }
        Ok(())
    }

    /// Deserialize a tree from `reader`, which must hold exactly one model.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut header = [0u8; KDTREE_HEADER_SIZE];
        read_exact(reader, &mut header)?;
        let dim = parse_header::<N>(&header)?;

        let mut record = vec![];
        let root = decode_subtree::<N, R>(reader, dim, &mut record)?;

        let mut trailing = [0u8; 1];
        if reader.read(&mut trailing)? != 0 {
            return Err(KDTreeError::Corrupt(
                "Unexpected bytes after the last record.".to_string(),
            ));
        }

        let dim = root.as_ref().map_or(0, |root| root.point.dimension());
        Ok(KDTree::new(root, dim))
    }

    /// Serialize this tree into a new byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = vec![];
        self.write_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Deserialize a tree from a byte buffer holding exactly one model.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = data;
        Self::read_from(&mut reader)
    }

    fn header(&self) -> Result<[u8; KDTREE_HEADER_SIZE]> {
        let dim = u32::try_from(self.dim).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Dimension {} does not fit in a model header.", self.dim),
            )
        })?;

        let mut header = [0u8; KDTREE_HEADER_SIZE];
        header[0] = KDTREE_MAGIC;
        header[1] = (KDTREE_VERSION << 4) + N::TYPE_INDEX;
        header[4..8].copy_from_slice(&dim.to_le_bytes());
        Ok(header)
    }
}

/// Validate a model header and return the dimension it declares.
fn parse_header<N: IndexableNum>(header: &[u8; KDTREE_HEADER_SIZE]) -> Result<usize> {
    if header[0] != KDTREE_MAGIC {
        return Err(KDTreeError::Corrupt(
            "Data not in k-d tree model format.".to_string(),
        ));
    }

    let version_and_type = header[1];
    let version = version_and_type >> 4;
    if version != KDTREE_VERSION {
        return Err(KDTreeError::Corrupt(format!(
            "Got v{} data when expected v{}.",
            version, KDTREE_VERSION
        )));
    }

    let type_ = version_and_type & 0x0f;
    if type_ != N::TYPE_INDEX {
        return Err(KDTreeError::Corrupt(format!(
            "Got type {} data when expected type {}.",
            type_,
            N::TYPE_INDEX
        )));
    }

    Ok(read_u32(&header[4..8]) as usize)
}

/// Byte length of the body of a node record.
#[inline]
fn node_record_len<N: IndexableNum>(dim: usize) -> u64 {
    1 + 8 + 4 + dim as u64 * N::BYTES_PER_ELEMENT as u64
}

fn encode_record<N: IndexableNum>(node: Option<&KDNode<N>>, out: &mut Vec<u8>) {
    let Some(node) = node else {
        out.push(ABSENT);
        return;
    };

    out.push(PRESENT);
    out.extend_from_slice(&(node.point.index() as u64).to_le_bytes());
    out.extend_from_slice(&(node.axis as u32).to_le_bytes());
    for &coord in node.point.coords() {
        coord.write_le(out);
    }
}

/// Rebuild the tree from preorder records without recursing, so the depth of a model is bounded
/// by its size rather than the call stack.
fn decode_subtree<N: IndexableNum, R: Read>(
    reader: &mut R,
    dim: usize,
    record: &mut Vec<u8>,
) -> Result<Option<Box<KDNode<N>>>> {
    // nodes whose subtrees are still being read, with whether the left one is done
    let mut pending: Vec<(KDNode<N>, bool)> = vec![];

    loop {
        read_record::<N, R>(reader, dim, record)?;
        let mut subtree = match decode_record::<N>(record, dim)? {
            Some(node) => {
                pending.push((node, false));
                continue;
            }
            None => None,
        };

        // hang the finished subtree on its parent, closing every parent it completes
        loop {
            match pending.pop() {
                None => return Ok(subtree),
                Some((mut parent, false)) => {
                    parent.left = subtree;
                    pending.push((parent, true));
                    break;
                }
                Some((mut parent, true)) => {
                    parent.right = subtree;
                    subtree = Some(Box::new(parent));
                }
            }
        }
    }
}

/// Read one length-prefixed record body into `record`.
fn read_record<N: IndexableNum, R: Read>(
    reader: &mut R,
    dim: usize,
    record: &mut Vec<u8>,
) -> Result<()> {
    let mut len = [0u8; RECORD_LENGTH_SIZE];
    read_exact(reader, &mut len)?;
    let len = u64::from_le_bytes(len);

    let expected = node_record_len::<N>(dim);
    if len != 1 && len != expected {
        return Err(KDTreeError::Corrupt(format!(
            "Got record of {} bytes when expected 1 or {}.",
            len, expected
        )));
    }

    // the header dimension is untrusted, so the buffer only grows with bytes actually read
    record.clear();
    let read = reader.by_ref().take(len).read_to_end(record)?;
    if (read as u64) < len {
        return Err(KDTreeError::Corrupt("Model data is truncated.".to_string()));
    }
    Ok(())
}

fn decode_record<N: IndexableNum>(record: &[u8], dim: usize) -> Result<Option<KDNode<N>>> {
    match record.first() {
        Some(&ABSENT) if record.len() == 1 => Ok(None),
        Some(&PRESENT) if record.len() as u64 == node_record_len::<N>(dim) => {
            let index = usize::try_from(read_u64(&record[1..9])).map_err(|_| {
                KDTreeError::Corrupt("Point identifier does not fit in usize.".to_string())
            })?;
            let axis = read_u32(&record[9..13]) as usize;
            if axis >= dim {
                return Err(KDTreeError::Corrupt(format!(
                    "Got axis {} for dimension {}.",
                    axis, dim
                )));
            }

            let coords = record[13..]
                .chunks_exact(N::BYTES_PER_ELEMENT)
                .map(N::read_le)
                .collect();
            Ok(Some(KDNode::new(Point::new(coords, index), axis)))
        }
        Some(marker) => Err(KDTreeError::Corrupt(format!(
            "Got record with marker {} and length {}.",
            marker,
            record.len()
        ))),
        None => Err(KDTreeError::Corrupt("Got empty record.".to_string())),
    }
}

/// `read_exact` reporting a short read as corrupt data rather than an I/O failure.
fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => {
            KDTreeError::Corrupt("Model data is truncated.".to_string())
        }
        _ => KDTreeError::Io(err),
    })
}

#[inline]
fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}

#[inline]
fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}
