//=========================================================================
// Handler List
//=========================================================================
//
// Ordered sequence of handlers registered for one event kind.
//
// Registration order is delivery order. The same handler may appear
// more than once; each occurrence is delivered separately.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ptr;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::Handler;

//=========================================================================

/// Handlers for a single event kind, in registration order.
#[derive(Default)]
pub(super) struct HandlerList {
    handlers: Vec<Handler>,
}

impl HandlerList {
    pub(super) fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler. Duplicates are kept.
    pub(super) fn push(&mut self, handler: Handler) {
        self.handlers.push(handler);
    }

    /// Removes the first occurrence of `handler` by identity.
    ///
    /// Returns false if the handler was not registered.
    pub(super) fn remove_first(&mut self, handler: &Handler) -> bool {
        match self.handlers.iter().position(|h| same_handler(h, handler)) {
            Some(index) => {
                self.handlers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Clones the current handler handles for dispatch.
    ///
    /// Dispatch iterates the snapshot, so handlers may register or
    /// unregister while an emit is in progress.
    pub(super) fn snapshot(&self) -> Vec<Handler> {
        self.handlers.clone()
    }

    pub(super) fn len(&self) -> usize {
        self.handlers.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Identity comparison on the allocation, ignoring vtable metadata.
fn same_handler(a: &Handler, b: &Handler) -> bool {
    ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event_bus::GameEvent;

    fn noop() -> Handler {
        Rc::new(|_: &GameEvent| {})
    }

    #[test]
    fn new_list_is_empty() {
        let list = HandlerList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn push_keeps_duplicates() {
        let mut list = HandlerList::new();
        let h = noop();
        list.push(h.clone());
        list.push(h.clone());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_first_only_removes_one_occurrence() {
        let mut list = HandlerList::new();
        let h = noop();
        let other = noop();
        list.push(h.clone());
        list.push(other.clone());
        list.push(h.clone());

        assert!(list.remove_first(&h));
        assert_eq!(list.len(), 2);

        let remaining = list.snapshot();
        assert!(same_handler(&remaining[0], &other));
        assert!(same_handler(&remaining[1], &h));
    }

    #[test]
    fn remove_unknown_handler_is_noop() {
        let mut list = HandlerList::new();
        list.push(noop());
        assert!(!list.remove_first(&noop()));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn distinct_closures_are_distinct_handlers() {
        let a = noop();
        let b = noop();
        assert!(same_handler(&a, &a.clone()));
        assert!(!same_handler(&a, &b));
    }
}
