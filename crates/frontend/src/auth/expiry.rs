//! Session-expiry notification
//!
//! The HTTP client terminates the session when a token refresh fails; the
//! auth provider registers a listener here so it can sync UI state and
//! navigate to login without the client knowing about routing.

use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static EXPIRY_LISTENER: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Register the listener invoked when the session expires. Replaces any
/// previously registered listener.
pub fn listen_for_expiry(listener: Rc<dyn Fn()>) {
    EXPIRY_LISTENER.with(|slot| {
        *slot.borrow_mut() = Some(listener);
    });
}

/// Remove the registered listener, if any.
pub fn stop_listening_for_expiry() {
    EXPIRY_LISTENER.with(|slot| {
        slot.borrow_mut().take();
    });
}

/// Notify the registered listener that the session has expired.
pub fn notify_session_expired() {
    // Clone out of the slot first so a listener that re-registers itself
    // does not hit a re-entrant borrow.
    let listener = EXPIRY_LISTENER.with(|slot| slot.borrow().clone());
    if let Some(listener) = listener {
        listener();
    }
}
