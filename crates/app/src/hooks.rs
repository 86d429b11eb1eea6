//! Post-render hook registry.
//!
//! Whoever renders the status icons calls [`PostRenderHooks::notify_rendered`]
//! once the icons exist; every registered callback then runs, in registration
//! order. The reconciler registers itself here instead of wrapping the host's
//! render function.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`PostRenderHooks::register`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

type Hook = Rc<dyn Fn()>;

/// Single-threaded registry of callbacks run after icons are rendered.
#[derive(Default)]
pub struct PostRenderHooks {
    hooks: RefCell<Vec<(HookId, Hook)>>,
    next_id: Cell<u64>,
}

impl PostRenderHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback to run after every render.
    pub fn register(&self, hook: impl Fn() + 'static) -> HookId {
        let id = HookId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.hooks.borrow_mut().push((id, Rc::new(hook)));
        id
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unregister(&self, id: HookId) -> bool {
        let mut hooks = self.hooks.borrow_mut();
        let before = hooks.len();
        hooks.retain(|(hook_id, _)| *hook_id != id);
        hooks.len() != before
    }

    /// Run every registered callback. Returns how many ran.
    ///
    /// The list is copied before running so a callback may register or
    /// unregister hooks without a re-entrant borrow.
    pub fn notify_rendered(&self) -> usize {
        let hooks: Vec<Hook> = self
            .hooks
            .borrow()
            .iter()
            .map(|(_, hook)| Rc::clone(hook))
            .collect();
        tracing::debug!(count = hooks.len(), "running post-render hooks");
        for hook in &hooks {
            hook();
        }
        hooks.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.borrow().is_empty()
    }
}
