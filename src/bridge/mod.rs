//! # Cross-Runtime Call Bridge
//!
//! Delivers engine-side calls to a single managed target object, from
//! whichever thread the engine happens to call on.
//!
//! ## Dispatch order
//!
//! 1. No target set → [`BridgeError::NotInitialized`]
//! 2. Register the calling thread → [`BridgeError::ThreadAttachFailed`]
//! 3. Resolve the method on the target → [`BridgeError::MethodResolutionFailed`]
//! 4. Invoke it
//!
//! A registration made in step 2 is held by the runtime scope and released
//! when the scope drops, whichever step returns. The call's reference to the
//! target is always released before the scope.

pub mod config;
pub mod contract;
pub mod state;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{BridgeError, ConfigError};
use crate::runtime::{ManagedRuntime, RuntimeScope};

pub use config::BridgeConfig;
pub use contract::{CallArg, Contract, HandleEncoding, MethodSpec, TextureHandle};
pub use state::{BridgeStats, StatsSnapshot};

/// Bridge from engine callbacks into one managed target
pub struct Bridge<R: ManagedRuntime> {
    /// Hosting runtime, owned for the library's lifetime
    runtime: R,

    /// Current target. Calls take a clone of the `Arc` so a concurrent
    /// `clear_target` never pulls the object out from under them.
    target: RwLock<Option<Arc<R::Target>>>,

    /// Method names and signatures
    contract: RwLock<Contract>,

    /// Diagnostics
    stats: BridgeStats,
}

impl<R: ManagedRuntime> Bridge<R> {
    /// Create a bridge with the default contract
    pub fn new(runtime: R) -> Self {
        Self {
            runtime,
            target: RwLock::new(None),
            contract: RwLock::new(Contract::default()),
            stats: BridgeStats::new(),
        }
    }

    /// Create a bridge bound to the contract named by `config`
    pub fn with_config(runtime: R, config: &BridgeConfig) -> Result<Self, ConfigError> {
        let bridge = Self::new(runtime);
        bridge.configure(config)?;
        Ok(bridge)
    }

    /// Replace the contract. Applies to calls dispatched afterwards.
    pub fn configure(&self, config: &BridgeConfig) -> Result<(), ConfigError> {
        let contract = Contract::from_config(config)?;
        log::info!(
            "Bridge contract: {}, {}",
            contract.init_context,
            contract.register_texture
        );
        *self.contract.write() = contract;
        Ok(())
    }

    pub fn contract(&self) -> Contract {
        self.contract.read().clone()
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    // ========================================================================
    // TARGET
    // ========================================================================

    /// Register the managed target. Returns `true` if a previous target was
    /// replaced; the replaced reference is released.
    pub fn set_target(&self, target: R::Target) -> bool {
        let previous = self.target.write().replace(Arc::new(target));
        if previous.is_some() {
            log::warn!("Replacing existing target");
        } else {
            log::debug!("Target set");
        }
        previous.is_some()
    }

    /// Release the managed target. Safe to call when none is set.
    pub fn clear_target(&self) -> bool {
        let previous = self.target.write().take();
        if previous.is_some() {
            log::debug!("Target cleared");
        }
        previous.is_some()
    }

    pub fn has_target(&self) -> bool {
        self.target.read().is_some()
    }

    // ========================================================================
    // DISPATCH
    // ========================================================================

    /// Call `spec` on the target with `args`.
    ///
    /// A failed dispatch is logged once here and counted; the error is
    /// returned for callers that want it, and has had no effect on the target.
    pub fn dispatch(&self, spec: &MethodSpec, args: &[CallArg]) -> Result<(), BridgeError> {
        let _span = tracing::debug_span!("dispatch", method = spec.name()).entered();
        self.stats.record_dispatch();

        let result = self.deliver(spec, args);
        if let Err(e) = &result {
            self.stats.record_failure(e);
            log::error!("{}", e);
        }
        result
    }

    fn deliver(&self, spec: &MethodSpec, args: &[CallArg]) -> Result<(), BridgeError> {
        let snapshot = self.target.read().clone().ok_or(BridgeError::NotInitialized)?;

        let mut scope = self.runtime.enter()?;
        if scope.attached() {
            self.stats.record_attachment();
            log::trace!("Attached thread {:?}", std::thread::current().name());
        }

        let result = Self::call(&mut scope, &snapshot, spec, args);

        // May be the last reference if the target was cleared mid-call;
        // it must go while the thread is still registered.
        drop(snapshot);
        drop(scope);

        result?;
        self.stats.record_delivered();
        log::trace!("Delivered {}", spec);
        Ok(())
    }

    fn call<S>(scope: &mut S, target: &R::Target, spec: &MethodSpec, args: &[CallArg]) -> Result<(), BridgeError>
    where
        S: RuntimeScope<Target = R::Target>,
    {
        // Invocation is unchecked on the runtime side
        if !spec.accepts(args) {
            return Err(BridgeError::resolution(
                spec.name(),
                spec.signature(),
                format!("{} argument(s) do not match the descriptor", args.len()),
            ));
        }

        let method = scope.resolve(target, spec)?;
        scope.invoke(target, &method, args);
        Ok(())
    }

    /// Forward a context-initialization event
    pub fn init_context(&self) -> Result<(), BridgeError> {
        let spec = self.contract.read().init_context.clone();
        self.dispatch(&spec, &[])
    }

    /// Hand a graphics resource to the target
    pub fn register_texture(&self, handle: TextureHandle, width: i32, height: i32) -> Result<(), BridgeError> {
        let (spec, args) = {
            let contract = self.contract.read();
            (
                contract.register_texture.clone(),
                contract.register_args(handle, width, height),
            )
        };
        log::debug!("Registering texture {} ({}x{})", handle, width, height);
        self.dispatch(&spec, &args)
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
