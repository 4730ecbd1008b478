//! # Managed Runtime Seam
//!
//! The bridge talks to the hosting managed runtime only through these two
//! traits. [`ManagedRuntime::enter`] registers the calling thread and hands
//! back a scope; dropping the scope undoes that registration if, and only if,
//! the scope performed it. Every exit path of a call therefore releases the
//! thread, early returns included.

use crate::bridge::contract::{CallArg, MethodSpec};
use crate::error::BridgeError;

/// A managed runtime that bridged calls are delivered into
pub trait ManagedRuntime: Send + Sync {
    /// Durable reference to a managed object. Dropping it releases the object.
    type Target: Send + Sync;

    /// Thread registration held for the duration of one call
    type Scope<'rt>: RuntimeScope<Target = Self::Target>
    where
        Self: 'rt;

    /// Make the calling thread usable by the runtime.
    fn enter(&self) -> Result<Self::Scope<'_>, BridgeError>;
}

/// Calls made while the current thread is registered
pub trait RuntimeScope {
    type Target;

    /// A resolved method, valid for the target it was resolved on
    type Method;

    /// Whether this scope attached the thread (and will detach it on drop)
    fn attached(&self) -> bool;

    /// Look up `spec` on the target's runtime type.
    fn resolve(&mut self, target: &Self::Target, spec: &MethodSpec) -> Result<Self::Method, BridgeError>;

    /// Synchronously call a void method. Failures raised by the managed code
    /// itself are left to the runtime.
    fn invoke(&mut self, target: &Self::Target, method: &Self::Method, args: &[CallArg]);
}
