//! # Unity Texture Bridge
//!
//! Native half of an Android texture renderer plugin for Unity.
//!
//! The engine calls into this library on arbitrary threads; the library
//! forwards those calls to a managed `NativeApi` object living in the JVM.
//!
//! ## Modules
//!
//! - **Bridge**: target slot, call contract and dispatch
//! - **Runtime**: the seam to the managed runtime (thread registration, calls)
//! - **JNI**: JVM backend and `NativeApi` native methods
//! - **Unity**: engine-facing exports
//!
//! ## Author
//!
//! Aiblox (Alexsandro Alves de Oliveira)

pub mod bridge;
pub mod error;
pub mod jni;
pub mod logging;
pub mod runtime;
pub mod unity;

// Re-exports
pub use bridge::{Bridge, BridgeConfig, CallArg, Contract, HandleEncoding, MethodSpec, TextureHandle};
pub use error::{BridgeError, ConfigError};
pub use runtime::{ManagedRuntime, RuntimeScope};

use once_cell::sync::OnceCell;

use crate::jni::JniRuntime;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "unity_texture_bridge";

/// Process-wide bridge, created when the JVM loads the library
static BRIDGE: OnceCell<Bridge<JniRuntime>> = OnceCell::new();

/// Get the bridge instance, if the library has been loaded by the JVM
pub fn bridge() -> Option<&'static Bridge<JniRuntime>> {
    BRIDGE.get()
}

/// Store the process-wide bridge. Returns `false` if one already exists.
pub(crate) fn install(bridge: Bridge<JniRuntime>) -> bool {
    BRIDGE.set(bridge).is_ok()
}
