//! A cheaply-clonable, `'static` byte sink shared between the evaluator's `print` output and
//! test harnesses that want to assert on it. Plain `&mut Vec<u8>` doesn't work here because
//! [`Diagnostics`](crate::diagnostics::Diagnostics) and `Interpreter` store their sink as
//! `Box<dyn Write>`, which requires `'static` — an `Rc<RefCell<_>>` does, a borrow doesn't.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        SharedBuffer::default()
    }

    /// Returns the bytes written so far as a `String`. Panics if they aren't valid UTF-8 — every
    /// writer in this crate only ever writes `stringify`-produced text.
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("sink output to be valid UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
