//! Search box support
//!
//! The listing's search text is the one input where timing matters; see
//! [`SearchDebouncer`].

pub mod debounce;

pub use debounce::SearchDebouncer;
