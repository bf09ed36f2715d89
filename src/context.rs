use std::ops::{Deref, DerefMut};

use crate::value::Value;

/// Scope stack of context frames for one render.
/// The root frame is pushed at construction and stays for the whole render.
#[derive(Clone, Debug)]
pub struct ContextStack {
    frames: Vec<Value>,
}

impl ContextStack {
    pub fn new(root: Value) -> Self {
        Self { frames: vec![root] }
    }

    pub fn push(&mut self, frame: Value) {
        self.frames.push(frame);
    }

    /// Pops the innermost frame. The root frame is never popped; `None` then.
    pub fn pop(&mut self) -> Option<Value> {
        if self.frames.len() <= 1 {
            return None;
        }
        self.frames.pop()
    }

    /// Innermost frame.
    pub fn top(&self) -> Option<&Value> {
        self.frames.last()
    }

    /// Frame directly below the top, i.e. the enclosing section's value.
    pub fn parent(&self) -> Option<&Value> {
        self.frames.len().checked_sub(2).and_then(|i| self.frames.get(i))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames bottom (root) to top.
    pub fn frames(&self) -> &[Value] {
        &self.frames
    }

    /// Opens a scope: whatever is pushed through the returned guard is popped
    /// again when it drops, including on early return and unwinding.
    pub fn scope(&mut self) -> Scope<'_> {
        let depth = self.frames.len();
        Scope { stack: self, depth }
    }
}

/// Frames are given bottom (root) first. An empty `Vec` is a caller error:
/// lookups on such a stack find nothing and `.` has no current element.
impl From<Vec<Value>> for ContextStack {
    fn from(frames: Vec<Value>) -> Self {
        Self { frames }
    }
}

pub struct Scope<'a> {
    stack: &'a mut ContextStack,
    depth: usize,
}

impl Deref for Scope<'_> {
    type Target = ContextStack;

    fn deref(&self) -> &ContextStack {
        &*self.stack
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut ContextStack {
        &mut *self.stack
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.stack.frames.truncate(self.depth);
    }
}
