// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// One named value of a decoded SCSI structure.
///
/// Mirrors what a structured decoder hands out: plain integers (bit fields
/// are integers too, 0/1), text, raw byte runs, nested structures and lists.
/// `Absent` stands for an optional field the device did not return.
pub enum Field<'a> {
    Uint(u64),
    Text(&'a str),
    Bytes(&'a [u8]),
    Struct(&'a dyn StructuredResponse),
    List(Vec<Field<'a>>),
    Absent,
}

impl Field<'_> {
    /// Integer view, if this field is one.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Field::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }
}

impl From<u8> for Field<'_> {
    #[inline]
    fn from(v: u8) -> Self {
        Field::Uint(v.into())
    }
}

impl From<u16> for Field<'_> {
    #[inline]
    fn from(v: u16) -> Self {
        Field::Uint(v.into())
    }
}

impl From<u32> for Field<'_> {
    #[inline]
    fn from(v: u32) -> Self {
        Field::Uint(v.into())
    }
}

impl From<u64> for Field<'_> {
    #[inline]
    fn from(v: u64) -> Self {
        Field::Uint(v)
    }
}

impl From<bool> for Field<'_> {
    #[inline]
    fn from(v: bool) -> Self {
        Field::Uint(v.into())
    }
}

impl<'a, T> From<Option<T>> for Field<'a>
where
    T: Into<Field<'a>>,
{
    #[inline]
    fn from(v: Option<T>) -> Self {
        v.map_or(Field::Absent, Into::into)
    }
}

/// A decoded SCSI object (response parameter data or an outgoing CDB).
///
/// Implementors expose their named fields in wire order and can serialize
/// themselves back to the exact bytes they were decoded from.
pub trait StructuredResponse {
    /// Named fields in wire order.
    fn fields(&self) -> Vec<(&'static str, Field<'_>)>;

    /// Exact raw byte representation.
    fn to_bytes(&self) -> Vec<u8>;

    /// Length of the raw encoding.
    fn byte_size(&self) -> usize {
        self.to_bytes().len()
    }

    /// Look up a single field by name.
    fn field(&self, name: &str) -> Option<Field<'_>> {
        self.fields()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, f)| f)
    }
}

/// Raw byte buffer with no further structure; renders only as raw/hex/JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBuffer(pub Vec<u8>);

impl StructuredResponse for RawBuffer {
    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        vec![("data", Field::Bytes(&self.0))]
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.clone()
    }

    fn byte_size(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<u8>> for RawBuffer {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}
