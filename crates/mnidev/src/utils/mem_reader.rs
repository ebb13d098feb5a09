use std::fmt::Debug;

/// An error produced while reading structured data out of an in-memory
/// buffer.
///
/// Every variant records the context path (e.g. `CZONE1.MNI/attributes`) and
/// the position within that context where the problem was found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemReaderError {
    #[error(
        "Not enough data in {context} at position {position}. Needed {required}, but only {available} available."
    )]
    TruncatedData {
        context: String,
        position: usize,
        required: usize,
        available: usize,
    },
    #[error("Invalid data in {context} at position {position}: {message}")]
    InvalidData {
        context: String,
        position: usize,
        message: String,
    },
}

impl MemReaderError {
    #[must_use]
    pub fn context(&self) -> &str {
        match self {
            MemReaderError::TruncatedData { context, .. }
            | MemReaderError::InvalidData { context, .. } => context,
        }
    }
}

pub type Result<T, E = MemReaderError> = std::result::Result<T, E>;

macro_rules! impl_read_int {
    ($name:ident, $ty:ty) => {
        fn $name(&mut self) -> Result<$ty> {
            let mut buf = [0u8; std::mem::size_of::<$ty>()];
            self.read_exact(&mut buf)?;
            Ok(<$ty>::from_le_bytes(buf))
        }
    };
}

pub trait MemReader {
    fn seek_to(&mut self, offset: usize) -> Result<()>;

    #[must_use]
    fn tell(&self) -> usize;

    #[must_use]
    fn data_size(&self) -> usize;

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Create a [`MemReaderError::InvalidData`] at the current position.
    fn create_invalid_data_error<M>(&self, message: M) -> MemReaderError
    where
        M: Into<String>;

    /// Create a [`MemReaderError::TruncatedData`] at the current position.
    fn create_truncated_error(&self, required: usize) -> MemReaderError;

    #[must_use]
    fn remaining(&self) -> usize {
        self.data_size() - self.tell()
    }

    #[must_use]
    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn skip(&mut self, len: usize) -> Result<()> {
        if self.remaining() < len {
            return Err(self.create_truncated_error(len));
        }
        self.seek_to(self.tell() + len)
    }

    /// Fails with [`MemReaderError::TruncatedData`] unless the remaining data
    /// can be split into whole records of `record_size` bytes.
    fn ensure_remaining_multiple_of(&self, record_size: usize) -> Result<()> {
        let overflow = self.remaining() % record_size;
        if overflow != 0 {
            // The last record is short by this many bytes.
            return Err(self.create_truncated_error(self.remaining() - overflow + record_size));
        }
        Ok(())
    }

    fn read_values<T: Parse>(&mut self, count: usize) -> Result<Vec<T>>
    where
        Self: Sized,
    {
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(T::parse(self)?);
        }
        Ok(values)
    }

    /// Reads records until the end of the data. The data must consist of
    /// whole records.
    fn split_values<T: Parse + FixedSize>(&mut self) -> Result<Vec<T>>
    where
        Self: Sized,
    {
        self.ensure_remaining_multiple_of(T::SIZE)?;
        let count = self.remaining() / T::SIZE;
        self.read_values(count)
    }

    impl_read_int!(read_u8, u8);
    impl_read_int!(read_i8, i8);
    impl_read_int!(read_u16_le, u16);
    impl_read_int!(read_i16_le, i16);
    impl_read_int!(read_u32_le, u32);
    impl_read_int!(read_i32_le, i32);

    fn read_u24_le(&mut self) -> Result<u32> {
        let mut buf = [0u8; 3];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes([buf[0], buf[1], buf[2], 0]))
    }
}

impl<M> MemReader for &mut M
where
    M: MemReader,
{
    fn seek_to(&mut self, offset: usize) -> Result<()> {
        (**self).seek_to(offset)
    }

    fn tell(&self) -> usize {
        (**self).tell()
    }

    fn data_size(&self) -> usize {
        (**self).data_size()
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_exact(buf)
    }

    fn create_invalid_data_error<Msg>(&self, message: Msg) -> MemReaderError
    where
        Msg: Into<String>,
    {
        (**self).create_invalid_data_error(message)
    }

    fn create_truncated_error(&self, required: usize) -> MemReaderError {
        (**self).create_truncated_error(required)
    }
}

/// A [`MemReader`] over a borrowed byte slice.
///
/// Sub-readers borrow from the same slice, so a nested structure can be
/// handed out without copying, and every error names the chain of contexts
/// that led to it.
#[derive(Clone)]
pub struct SliceMemReader<'a> {
    data: &'a [u8],
    position: usize,
    context: String,
}

impl Debug for SliceMemReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemReader")
            .field("context", &self.context)
            .field("size", &self.data.len())
            .field("position", &self.position)
            .finish()
    }
}

impl<'a> SliceMemReader<'a> {
    #[must_use]
    pub fn new<C>(context: C, data: &'a [u8]) -> Self
    where
        C: Into<String>,
    {
        Self {
            data,
            position: 0,
            context: context.into(),
        }
    }

    fn nested_context(&self, context: &str) -> String {
        format!("{}/{}", self.context, context)
    }

    /// Reads `len` bytes, returning them as a slice of the underlying data.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(self.create_truncated_error(len));
        }
        let start = self.position;
        self.position += len;
        Ok(&self.data[start..self.position])
    }

    /// Returns all unread bytes and moves to the end of the data.
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let start = self.position;
        self.position = self.data.len();
        &self.data[start..]
    }

    /// Splits off the next `len` bytes into their own reader.
    pub fn read_to_subreader(&mut self, context: &str, len: usize) -> Result<SliceMemReader<'a>> {
        let context = self.nested_context(context);
        let data = self.read_bytes(len)?;
        Ok(SliceMemReader {
            data,
            position: 0,
            context,
        })
    }

    /// Creates a reader over `offset..offset + len` of this reader's data,
    /// independent of the current position.
    pub fn sub_reader_at(
        &self,
        context: &str,
        offset: usize,
        len: Option<usize>,
    ) -> Result<SliceMemReader<'a>> {
        let size = self.data.len();
        let end = match len {
            Some(len) => offset.checked_add(len),
            None => Some(size),
        };
        match end {
            Some(end) if offset <= end && end <= size => Ok(SliceMemReader {
                data: &self.data[offset..end],
                position: 0,
                context: self.nested_context(context),
            }),
            _ => Err(MemReaderError::TruncatedData {
                context: self.nested_context(context),
                position: offset,
                required: len.unwrap_or(0),
                available: size.saturating_sub(offset),
            }),
        }
    }
}

impl MemReader for SliceMemReader<'_> {
    fn seek_to(&mut self, offset: usize) -> Result<()> {
        if self.data.len() < offset {
            return Err(MemReaderError::TruncatedData {
                context: self.context.clone(),
                position: self.position,
                required: offset,
                available: self.data.len(),
            });
        }
        self.position = offset;
        Ok(())
    }

    fn tell(&self) -> usize {
        self.position
    }

    fn data_size(&self) -> usize {
        self.data.len()
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let bytes = self.read_bytes(buf.len())?;
        buf.copy_from_slice(bytes);
        Ok(())
    }

    fn create_invalid_data_error<M>(&self, message: M) -> MemReaderError
    where
        M: Into<String>,
    {
        MemReaderError::InvalidData {
            context: self.context.clone(),
            position: self.position,
            message: message.into(),
        }
    }

    fn create_truncated_error(&self, required: usize) -> MemReaderError {
        MemReaderError::TruncatedData {
            context: self.context.clone(),
            position: self.position,
            required,
            available: self.remaining(),
        }
    }
}

/// A trait for types that can be parsed from a `MemReader`.
pub trait Parse: Sized {
    /// Parses a value from the given `MemReader`.
    ///
    /// This function should leave the reader at the position immediately after
    /// the parsed value.
    fn parse<M: MemReader>(reader: &mut M) -> Result<Self>;
}

impl Parse for u16 {
    fn parse<M: MemReader>(reader: &mut M) -> Result<Self> {
        reader.read_u16_le()
    }
}

impl Parse for u32 {
    fn parse<M: MemReader>(reader: &mut M) -> Result<Self> {
        reader.read_u32_le()
    }
}

/// Records with a fixed on-disk size.
pub trait FixedSize {
    const SIZE: usize;
}
