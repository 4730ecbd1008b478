//! # JNI Callback Runtime
//!
//! Calls from Rust back into the managed `NativeApi` object.

use jni::objects::{GlobalRef, JMethodID};
use jni::signature::{Primitive, ReturnType};
use jni::{AttachGuard, JavaVM};

use super::types::to_jvalues;
use crate::bridge::contract::{CallArg, MethodSpec};
use crate::error::BridgeError;
use crate::runtime::{ManagedRuntime, RuntimeScope};

/// The hosting JVM, captured once at library load
pub struct JniRuntime {
    vm: JavaVM,
}

impl JniRuntime {
    pub fn new(vm: JavaVM) -> Self {
        Self { vm }
    }
}

impl ManagedRuntime for JniRuntime {
    type Target = GlobalRef;
    type Scope<'rt> = JniScope<'rt>;

    fn enter(&self) -> Result<JniScope<'_>, BridgeError> {
        let attached = self.vm.get_env().is_err();

        // Nested guard when the thread is already attached; it won't detach
        let env = self
            .vm
            .attach_current_thread()
            .map_err(|e| BridgeError::ThreadAttachFailed(e.to_string()))?;

        Ok(JniScope { env, attached })
    }
}

/// JNI environment of the calling thread, detached on drop if we attached it
pub struct JniScope<'rt> {
    env: AttachGuard<'rt>,
    attached: bool,
}

impl JniScope<'_> {
    fn clear_exception(&mut self) {
        if self.env.exception_check().unwrap_or(false) {
            let _ = self.env.exception_clear();
        }
    }
}

impl RuntimeScope for JniScope<'_> {
    type Target = GlobalRef;
    type Method = JMethodID;

    fn attached(&self) -> bool {
        self.attached
    }

    fn resolve(&mut self, target: &GlobalRef, spec: &MethodSpec) -> Result<JMethodID, BridgeError> {
        let class = match self.env.get_object_class(target) {
            Ok(class) => class,
            Err(e) => {
                self.clear_exception();
                return Err(BridgeError::resolution(
                    spec.name(),
                    spec.signature(),
                    format!("can't get class of target: {}", e),
                ));
            }
        };

        let method = self.env.get_method_id(&class, spec.name(), spec.signature());
        let _ = self.env.delete_local_ref(class);

        method.map_err(|e| {
            // NoSuchMethodError is pending; it is reported through the error instead
            self.clear_exception();
            BridgeError::resolution(spec.name(), spec.signature(), e.to_string())
        })
    }

    fn invoke(&mut self, target: &GlobalRef, method: &JMethodID, args: &[CallArg]) {
        let args = to_jvalues(args);

        // SAFETY: `method` was resolved on the target's class and the bridge
        // checked `args` against its descriptor; every contract method is void.
        let result = unsafe {
            self.env.call_method_unchecked(
                target,
                *method,
                ReturnType::Primitive(Primitive::Void),
                &args,
            )
        };

        // A Java exception stays pending for the runtime to deliver
        if let Err(e) = result {
            log::warn!("Managed call failed: {}", e);
        }
    }
}

impl Drop for JniScope<'_> {
    fn drop(&mut self) {
        if self.attached {
            log::trace!("Detaching thread {:?}", std::thread::current().name());
        }
    }
}
