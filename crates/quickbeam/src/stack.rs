//! Host stack safety for recursive evaluation
//!
//! Every node evaluation runs through [`ensure_sufficient_stack`], so deep
//! but bounded recursion in a program grows the host stack on demand
//! instead of aborting the process. The binding stack's own depth limit
//! is what turns runaway recursion into `StackOverflow`.

/// Run `f`, first growing the host stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum headroom before a node is evaluated (128KB).
    const RED_ZONE: usize = 128 * 1024;

    /// Size of each freshly allocated stack segment (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
