//! In-process managed runtime that records thread registration and calls.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicIsize, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use unity_texture_bridge::{BridgeError, CallArg, ManagedRuntime, MethodSpec, RuntimeScope};

/// A call received by a [`ManagedObject`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: String,
    pub args: Vec<CallArg>,
}

/// A managed object exposing a fixed set of methods
pub struct ManagedObject {
    pub name: &'static str,
    methods: Vec<MethodSpec>,
    calls: Mutex<Vec<RecordedCall>>,
    hook: Mutex<Option<Box<dyn Fn() + Send>>>,
    drop_hook: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl ManagedObject {
    pub fn with_methods(name: &'static str, methods: Vec<MethodSpec>) -> Arc<Self> {
        Arc::new(Self {
            name,
            methods,
            calls: Mutex::new(Vec::new()),
            hook: Mutex::new(None),
            drop_hook: Mutex::new(None),
        })
    }

    /// Object matching the default contract
    pub fn native_api(name: &'static str) -> Arc<Self> {
        Self::with_methods(
            name,
            vec![
                MethodSpec::new("initContext", "()V"),
                MethodSpec::new("registerTexture", "(JII)V"),
            ],
        )
    }

    /// Object built against the 32-bit handle signature
    pub fn legacy_native_api(name: &'static str) -> Arc<Self> {
        Self::with_methods(
            name,
            vec![
                MethodSpec::new("initContext", "()V"),
                MethodSpec::new("registerTexture", "(III)V"),
            ],
        )
    }

    /// Run `hook` inside every call this object receives
    pub fn on_call(&self, hook: impl Fn() + Send + 'static) {
        *self.hook.lock().unwrap() = Some(Box::new(hook));
    }

    /// Run `hook` when the last reference to this object goes away
    pub fn on_drop(&self, hook: impl FnOnce() + Send + 'static) {
        *self.drop_hook.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Drop for ManagedObject {
    fn drop(&mut self) {
        if let Some(hook) = self.drop_hook.get_mut().unwrap().take() {
            hook();
        }
    }
}

/// Runtime whose thread registration can be observed and made to fail
#[derive(Default)]
pub struct RecordingRuntime {
    pre_attached: AtomicBool,
    fail_attach: AtomicBool,
    attaches: AtomicUsize,
    detaches: AtomicUsize,
    live: Arc<AtomicIsize>,
    calls_while_attached: AtomicUsize,
}

impl RecordingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat calling threads as already registered
    pub fn set_pre_attached(&self, value: bool) {
        self.pre_attached.store(value, Ordering::SeqCst);
    }

    pub fn set_fail_attach(&self, value: bool) {
        self.fail_attach.store(value, Ordering::SeqCst);
    }

    pub fn attaches(&self) -> usize {
        self.attaches.load(Ordering::SeqCst)
    }

    pub fn detaches(&self) -> usize {
        self.detaches.load(Ordering::SeqCst)
    }

    /// Registrations not yet undone
    pub fn live(&self) -> isize {
        self.live.load(Ordering::SeqCst)
    }

    /// Shared view of [`live`](Self::live), for observers outliving a borrow
    pub fn live_counter(&self) -> Arc<AtomicIsize> {
        self.live.clone()
    }

    pub fn calls_while_attached(&self) -> usize {
        self.calls_while_attached.load(Ordering::SeqCst)
    }
}

pub struct RecordingScope<'rt> {
    runtime: &'rt RecordingRuntime,
    attached: bool,
}

impl ManagedRuntime for RecordingRuntime {
    type Target = Arc<ManagedObject>;
    type Scope<'rt> = RecordingScope<'rt>;

    fn enter(&self) -> Result<RecordingScope<'_>, BridgeError> {
        if self.pre_attached.load(Ordering::SeqCst) {
            return Ok(RecordingScope { runtime: self, attached: false });
        }
        if self.fail_attach.load(Ordering::SeqCst) {
            return Err(BridgeError::ThreadAttachFailed("attach refused".to_string()));
        }

        self.attaches.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(RecordingScope { runtime: self, attached: true })
    }
}

impl RuntimeScope for RecordingScope<'_> {
    type Target = Arc<ManagedObject>;
    type Method = MethodSpec;

    fn attached(&self) -> bool {
        self.attached
    }

    fn resolve(&mut self, target: &Arc<ManagedObject>, spec: &MethodSpec) -> Result<MethodSpec, BridgeError> {
        target
            .methods
            .iter()
            .find(|m| *m == spec)
            .cloned()
            .ok_or_else(|| BridgeError::resolution(spec.name(), spec.signature(), "no such method"))
    }

    fn invoke(&mut self, target: &Arc<ManagedObject>, method: &MethodSpec, args: &[CallArg]) {
        if self.attached {
            self.runtime.calls_while_attached.fetch_add(1, Ordering::SeqCst);
        }

        target.calls.lock().unwrap().push(RecordedCall {
            method: method.name().to_string(),
            args: args.to_vec(),
        });

        if let Some(hook) = target.hook.lock().unwrap().as_ref() {
            hook();
        }
    }
}

impl Drop for RecordingScope<'_> {
    fn drop(&mut self) {
        if self.attached {
            self.runtime.detaches.fetch_add(1, Ordering::SeqCst);
            self.runtime.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
