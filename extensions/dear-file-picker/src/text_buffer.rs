/// Owned, NUL-terminated text buffer backing the picker's single-line editors.
///
/// The backing storage is always exactly `capacity()` bytes long and contains
/// at least one NUL byte, so a text widget may write into
/// [`as_mut_bytes`](Self::as_mut_bytes) directly and call [`grow`](Self::grow)
/// from its resize callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBuffer {
    bytes: Vec<u8>,
}

const MIN_CAPACITY: usize = 16;

impl Default for TextBuffer {
    fn default() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }
}

impl TextBuffer {
    /// Empty buffer with at least `capacity` bytes (including the terminator).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity.max(1)],
        }
    }

    /// Current capacity in bytes, terminator included.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Reallocate to at least `1.5 * max(capacity, requested)` bytes.
    ///
    /// The content prefix is preserved and the buffer stays NUL-terminated.
    pub fn grow(&mut self, requested: usize) {
        let base = self.capacity().max(requested);
        let new_cap = base + base.div_ceil(2);
        // New tail bytes are zero, so the terminator is always present.
        self.bytes.resize(new_cap, 0);
    }

    /// Grow only if `required` bytes do not fit.
    pub fn ensure_capacity(&mut self, required: usize) {
        if required > self.capacity() {
            self.grow(required);
        }
    }

    /// Replace the content with `text`.
    pub fn set(&mut self, text: &str) {
        self.ensure_capacity(text.len() + 1);
        self.bytes.fill(0);
        self.bytes[..text.len()].copy_from_slice(text.as_bytes());
    }

    /// Empty the buffer, keeping its capacity.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Content up to the first NUL byte (lossy UTF-8).
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes[..self.len()])
    }

    /// Length of the content in bytes, terminator excluded.
    pub fn len(&self) -> usize {
        self.bytes
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(self.bytes.len())
    }

    /// Whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw storage for text widgets. Callers must keep a NUL byte inside.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_is_at_least_one_and_a_half_times_the_larger_size() {
        let mut buf = TextBuffer::with_capacity(10);
        buf.set("abc");
        buf.grow(4);
        assert!(buf.capacity() >= 15);
        assert_eq!(buf.as_str(), "abc");

        let before = buf.capacity();
        buf.grow(100);
        assert!(buf.capacity() >= 150);
        assert!(buf.capacity() > before);
        assert_eq!(buf.as_str(), "abc");
    }

    #[test]
    fn set_grows_and_keeps_terminator() {
        let mut buf = TextBuffer::with_capacity(2);
        buf.set("/home/user/projects");
        assert_eq!(buf.as_str(), "/home/user/projects");
        assert!(buf.capacity() > buf.len());
        let n = buf.len();
        assert_eq!(buf.as_mut_bytes()[n], 0);
    }

    #[test]
    fn widget_writes_are_read_up_to_nul() {
        let mut buf = TextBuffer::with_capacity(8);
        buf.as_mut_bytes()[..3].copy_from_slice(b"tmp");
        assert_eq!(buf.as_str(), "tmp");
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 8);
    }
}
