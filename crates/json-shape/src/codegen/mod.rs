//! Lowering passes over canonical schema trees.
//!
//! Validators are built as closure trees at compile time; nothing is
//! generated as source text or evaluated at runtime.

pub mod validator;
