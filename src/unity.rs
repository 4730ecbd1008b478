//! # Unity Plugin Interface
//!
//! Functions the engine imports with `[DllImport]`. `UNITY_INTERFACE_API` is
//! `__stdcall` on Windows and the C convention elsewhere, which is what
//! `extern "system"` gives us.
//!
//! See <https://docs.unity3d.com/Manual/NativePluginInterface.html>

use std::ffi::c_void;
use std::os::raw::c_int;

use crate::bridge::TextureHandle;
use crate::jni::JniRuntime;
use crate::Bridge;

/// `UnityRenderingEvent`, as accepted by `GL.IssuePluginEvent`
pub type UnityRenderingEvent = Option<extern "system" fn(event_id: c_int)>;

fn with_bridge(f: impl FnOnce(&Bridge<JniRuntime>)) {
    match crate::bridge() {
        Some(bridge) => f(bridge),
        None => log::error!("Not initialized: library was not loaded by the JVM"),
    }
}

extern "system" fn on_init_context_event(event_id: c_int) {
    log::debug!("Render event {} on {:?}", event_id, std::thread::current().name());
    with_bridge(|bridge| {
        let _ = bridge.init_context();
    });
}

/// Callback that forwards a render event to `initContext`
#[no_mangle]
pub extern "system" fn GetInitContextEventFunc() -> UnityRenderingEvent {
    Some(on_init_context_event)
}

/// Hand a native texture to the managed renderer
#[no_mangle]
pub extern "system" fn RegisterTexture(texture_ptr: *mut c_void, width: c_int, height: c_int) {
    let handle = TextureHandle::from_ptr(texture_ptr);
    if handle.is_null() {
        log::warn!("RegisterTexture called with a null texture");
    }
    with_bridge(|bridge| {
        let _ = bridge.register_texture(handle, width, height);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_func_is_set() {
        assert!(GetInitContextEventFunc().is_some());
    }

    #[test]
    fn test_calls_before_load_are_ignored() {
        // No JVM in unit tests, so JNI_OnLoad never installs a bridge
        assert!(crate::bridge().is_none());

        RegisterTexture(0x1000 as *mut c_void, 512, 256);
        let event = GetInitContextEventFunc().unwrap();
        event(0);

        assert!(crate::bridge().is_none());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_pointer_handle_keeps_high_bits() {
        let ptr = 0x7f12_3456_7000_usize as *mut c_void;
        let handle = TextureHandle::from_ptr(ptr);

        assert_eq!(handle, TextureHandle(0x7f12_3456_7000));
        assert_eq!(handle.to_long(), 0x7f12_3456_7000);
        assert_eq!(handle.to_int(), None);
    }
}
