use core::fmt;

use crate::FrameBufferAttributes;

/// Represents a 2-dimensional rendering target that can have pixel data read and written to it.
///
/// Positions are `[column, row]`. Row 0 is the bottom row of the rendered image.
pub trait Target {
    /// The type of items contained within this target.
    type Texel: Clone;

    /// Get the dimensions of the target as `[width, height]`.
    fn size(&self) -> [usize; 2];

    /// Get a copy of the item at the specified location.
    ///
    /// # Panics
    ///
    /// Panics if the location is not within the target.
    fn read(&self, pos: [usize; 2]) -> Self::Texel;

    /// Set the item at the specified location.
    ///
    /// # Panics
    ///
    /// Panics if the location is not within the target.
    fn write(&mut self, pos: [usize; 2], texel: Self::Texel);

    /// Get a copy of the item at the given assumed-valid location.
    ///
    /// # Safety
    ///
    /// Undefined behaviour will occur if the location is not within bounds.
    #[inline(always)]
    unsafe fn read_unchecked(&self, pos: [usize; 2]) -> Self::Texel {
        self.read(pos)
    }

    /// Set the item at the given assumed-valid location.
    ///
    /// # Safety
    ///
    /// Undefined behaviour will occur if the location is not within bounds.
    #[inline(always)]
    unsafe fn write_unchecked(&mut self, pos: [usize; 2], texel: Self::Texel) {
        self.write(pos, texel)
    }

    /// Clear the target with copies of the specified item.
    fn clear(&mut self, fill: Self::Texel);
}

/// A 2-dimensional buffer.
///
/// This type may be used to contain colour data, depth data, or arbitrary pixel data.
#[derive(Clone, PartialEq)]
pub struct Buffer2d<T> {
    items: Vec<T>,
    size: [usize; 2],
}

/// The frame buffer used by the stock attribute types.
pub type FrameBuffer = Buffer2d<FrameBufferAttributes>;

impl<T: Clone> Buffer2d<T> {
    /// Create a new buffer with the given size, filled with duplicates of the given element.
    pub fn fill([width, height]: [usize; 2], fill: T) -> Self {
        let len = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("Buffer of size {:?} is too large", [width, height]));
        Self {
            items: vec![fill; len],
            size: [width, height],
        }
    }
}

impl<T: Clone + Default> Buffer2d<T> {
    /// Create a new buffer with the given size, filled with the default element.
    pub fn new(size: [usize; 2]) -> Self {
        Self::fill(size, T::default())
    }

    /// Reset every item to its default value.
    pub fn reset(&mut self) {
        self.clear(T::default());
    }
}

impl<T> Buffer2d<T> {
    #[inline(always)]
    pub fn width(&self) -> usize {
        self.size[0]
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.size[1]
    }

    /// Convert the given position into a linear index into the raw data of this buffer.
    #[inline(always)]
    pub fn linear_index(&self, [x, y]: [usize; 2]) -> usize {
        y * self.size[0] + x
    }

    /// View this buffer as a linear slice of elements, bottom row first.
    #[inline]
    pub fn raw(&self) -> &[T] {
        &self.items
    }

    /// Iterate over the rows of this buffer, bottom row first.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[T]> + '_ {
        // `chunks_exact` panics on a zero chunk size
        self.items.chunks_exact(self.size[0].max(1))
    }

    #[inline]
    fn check(&self, pos: [usize; 2]) {
        if pos[0] >= self.size[0] || pos[1] >= self.size[1] {
            panic!(
                "Attempted to access buffer of size {:?} at out-of-bounds location {:?}",
                self.size, pos
            );
        }
    }
}

impl FrameBuffer {
    /// Flatten the colour channel into interleaved RGBA8 bytes for an image encoder.
    ///
    /// The output is row-major with the top row first and a stride of `width * 4`. Depth is
    /// discarded.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.items.len() * 4);
        self.rows()
            .rev()
            .flatten()
            .for_each(|px| bytes.extend_from_slice(&px.color.into_array()));
        bytes
    }
}

impl<T: Clone> Target for Buffer2d<T> {
    type Texel = T;

    #[inline(always)]
    fn size(&self) -> [usize; 2] {
        self.size
    }

    #[inline]
    fn read(&self, pos: [usize; 2]) -> Self::Texel {
        self.check(pos);
        self.items[self.linear_index(pos)].clone()
    }

    #[inline]
    fn write(&mut self, pos: [usize; 2], texel: Self::Texel) {
        self.check(pos);
        let idx = self.linear_index(pos);
        self.items[idx] = texel;
    }

    #[inline(always)]
    unsafe fn read_unchecked(&self, pos: [usize; 2]) -> Self::Texel {
        self.items.get_unchecked(self.linear_index(pos)).clone()
    }

    #[inline(always)]
    unsafe fn write_unchecked(&mut self, pos: [usize; 2], texel: Self::Texel) {
        let idx = self.linear_index(pos);
        *self.items.get_unchecked_mut(idx) = texel;
    }

    fn clear(&mut self, fill: Self::Texel) {
        for item in &mut self.items {
            *item = fill.clone();
        }
    }
}

impl<T> AsRef<[T]> for Buffer2d<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<T> AsMut<[T]> for Buffer2d<T> {
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> fmt::Debug for Buffer2d<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Buffer2d(dimensions: {:?})", self.size)
    }
}
