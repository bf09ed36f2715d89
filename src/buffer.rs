use std::fmt;

/// Output accumulator owned by a single render pass.
#[derive(Debug, Default)]
pub struct Buffer {
    buf: String,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drain: returns everything written so far and leaves the buffer empty.
    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }
}

impl fmt::Write for Buffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn finish_drains_once() {
        let mut buf = Buffer::new();
        buf.push_str("Hello, ");
        write!(buf, "{}!", "World").unwrap();
        assert_eq!(buf.finish(), "Hello, World!");
        assert!(buf.is_empty());
        assert_eq!(buf.finish(), "");
    }
}
