//! Failed-flag attribute file
//!
//! Exposes a single client's failed flag as a one-character text endpoint:
//! reads render `Y` or `N`, writes accept conventional boolean tokens and
//! invoke the client's state-transition hook on success.

use debug_tree::{AttrError, AttrHandler};
use std::cell::RefCell;
use std::rc::Rc;

/// Hook invoked with the new value after each successful flag write
pub type TransitionHook = Rc<dyn Fn(bool)>;

/// Usable bytes of a single write; anything beyond is dropped before parsing
const MAX_WRITE_BYTES: usize = 31;

/// Shared view of a client's failed flag
///
/// Cloned into the attribute file so the file and the owning client observe
/// the same value.
#[derive(Debug, Clone)]
pub struct SharedFailedFlag {
    inner: Rc<RefCell<bool>>,
}

impl SharedFailedFlag {
    /// Creates a flag with the given initial value
    pub fn new(initial: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(initial)),
        }
    }

    /// Current value
    pub fn get(&self) -> bool {
        *self.inner.borrow()
    }

    /// Stores a new value
    pub fn set(&self, value: bool) {
        *self.inner.borrow_mut() = value;
    }
}

impl Default for SharedFailedFlag {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Attribute file handler for a client's failed flag
pub struct FailedFlagFile {
    flag: SharedFailedFlag,
    on_transition: Option<TransitionHook>,
}

impl FailedFlagFile {
    /// Creates a handler over the client's shared flag
    pub fn new(flag: SharedFailedFlag, on_transition: Option<TransitionHook>) -> Self {
        Self {
            flag,
            on_transition,
        }
    }
}

impl AttrHandler for FailedFlagFile {
    fn read(&self) -> String {
        if self.flag.get() { "Y" } else { "N" }.to_string()
    }

    fn write(&mut self, input: &str) -> Result<(), AttrError> {
        let bytes = input.as_bytes();
        let bounded = String::from_utf8_lossy(&bytes[..bytes.len().min(MAX_WRITE_BYTES)]);
        let token = bounded.trim();

        let value =
            parse_bool(token).ok_or_else(|| AttrError::InvalidValue(token.to_string()))?;

        self.flag.set(value);
        if let Some(hook) = &self.on_transition {
            hook(value);
        }
        Ok(())
    }
}

/// Recognizes conventional boolean tokens, case-insensitively
fn parse_bool(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "y" | "yes" | "1" | "true" => Some(true),
        "n" | "no" | "0" | "false" => Some(false),
        _ => None,
    }
}
