//! Crate includes reusable utils for tools that handle common behavior.
//! Such as initializing the tracing framework.

pub mod logging;
