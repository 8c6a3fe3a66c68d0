//! Cancelable notification primitives.
//!
//! Every externally visible transition in the grid is announced first through
//! a "before" hook. Hooks run synchronously in registration order; a hook may
//! rewrite the event detail or cancel the whole operation. Once a hook
//! cancels, the remaining hooks are skipped and the caller must stop before
//! any ordinary side effect.

/// Mutable event context handed to each hook.
pub struct EventCtx<T> {
    /// Event payload; hooks may rewrite it (e.g. substitute a target cell).
    pub detail: T,
    canceled: bool,
}

impl<T> EventCtx<T> {
    /// Wrap a payload in a fresh, non-canceled context.
    pub fn new(detail: T) -> Self {
        EventCtx {
            detail,
            canceled: false,
        }
    }

    /// Veto the operation this event announces.
    pub fn prevent_default(&mut self) {
        self.canceled = true;
    }

    /// Whether any hook vetoed the operation.
    pub fn default_prevented(&self) -> bool {
        self.canceled
    }
}

type HookFn<T> = Box<dyn FnMut(&mut EventCtx<T>)>;

/// An ordered list of hooks for one notification.
pub struct HookList<T> {
    hooks: Vec<HookFn<T>>,
}

impl<T> Default for HookList<T> {
    fn default() -> Self {
        HookList { hooks: Vec::new() }
    }
}

impl<T> HookList<T> {
    /// Register a hook; hooks fire in registration order.
    pub fn on(&mut self, hook: impl FnMut(&mut EventCtx<T>) + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Emit `detail` through the registered hooks.
    ///
    /// Runs each hook in order until one calls
    /// [`prevent_default`](EventCtx::prevent_default); remaining hooks are
    /// skipped. Returns the final context so the caller can inspect both the
    /// (possibly rewritten) detail and the veto flag.
    pub fn emit(&mut self, detail: T) -> EventCtx<T> {
        let mut ctx = EventCtx::new(detail);
        for hook in &mut self.hooks {
            hook(&mut ctx);
            if ctx.canceled {
                break;
            }
        }
        ctx
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// True when no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
