//! # JNI Bindings
//!
//! The JVM side of the bridge: the runtime backend that calls into the
//! managed `NativeApi` object, and the native methods `NativeApi` declares.
//!
//! ## Safety
//!
//! All JNI functions are inherently unsafe as they deal with raw pointers
//! from the JVM. Method calls are made unchecked, so arguments are matched
//! against the method descriptor before every call.

pub mod bridge;
pub mod callback;
pub mod types;

pub use callback::{JniRuntime, JniScope};
