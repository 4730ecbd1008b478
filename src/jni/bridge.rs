//! # JNI Bridge Implementation
//!
//! Library load hooks and the native methods declared by the Kotlin
//! `com.example.unity.texture.NativeApi` class.
//!
//! ## Function Naming Convention
//!
//! JNI functions must follow this pattern:
//! `Java_<package>_<class>_<method>`
//!
//! For example:
//! `Java_com_example_unity_texture_NativeApi_initialize`

use std::ffi::c_void;

use anyhow::Context;
use jni::objects::{JByteArray, JObject};
use jni::sys::{jint, JNI_ERR};
use jni::{JNIEnv, JavaVM};

use super::callback::JniRuntime;
use super::types::JNI_VERSION;
use crate::bridge::{Bridge, BridgeConfig};

// ============================================================================
// LIBRARY LIFECYCLE
// ============================================================================

/// Capture the JVM and create the process-wide bridge
#[no_mangle]
pub unsafe extern "system" fn JNI_OnLoad(vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) -> jint {
    crate::logging::init();

    match on_load(vm) {
        Ok(()) => JNI_VERSION,
        Err(e) => {
            log::error!("JNI_OnLoad failed: {:#}", e);
            JNI_ERR
        }
    }
}

unsafe fn on_load(vm: *mut jni::sys::JavaVM) -> anyhow::Result<()> {
    let vm = JavaVM::from_raw(vm).context("Invalid JavaVM pointer")?;
    log::info!("JNI: library loaded (v{})", crate::VERSION);

    if !crate::install(Bridge::new(JniRuntime::new(vm))) {
        log::warn!("JNI_OnLoad called twice, keeping the existing bridge");
    }
    Ok(())
}

/// Drop the target before the library goes away
#[no_mangle]
pub unsafe extern "system" fn JNI_OnUnload(_vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) {
    if let Some(bridge) = crate::bridge() {
        bridge.clear_target();
    }
    log::info!("JNI: library unloaded");
}

// ============================================================================
// NativeApi
// ============================================================================

/// `NativeApi.initialize()`: make this object the call target
#[no_mangle]
pub extern "system" fn Java_com_example_unity_texture_NativeApi_initialize(
    env: JNIEnv,
    this: JObject,
) {
    let bridge = match crate::bridge() {
        Some(bridge) => bridge,
        None => {
            log::error!("JNI: initialize called before JNI_OnLoad");
            return;
        }
    };

    match env.new_global_ref(&this) {
        Ok(target) => {
            bridge.set_target(target);
            log::info!("JNI: NativeApi initialized on {:?}", std::thread::current().name());
        }
        Err(e) => log::error!("Failed to create global ref: {}", e),
    }
}

/// `NativeApi.release()`: drop the call target
#[no_mangle]
pub extern "system" fn Java_com_example_unity_texture_NativeApi_release(
    _env: JNIEnv,
    _this: JObject,
) {
    if let Some(bridge) = crate::bridge() {
        if bridge.clear_target() {
            log::info!("JNI: NativeApi released");
        }
    }
}

/// `NativeApi.configure(byte[])`: apply a JSON configuration
#[no_mangle]
pub extern "system" fn Java_com_example_unity_texture_NativeApi_configure(
    env: JNIEnv,
    _this: JObject,
    config: JByteArray,
) {
    let config_bytes = match env.convert_byte_array(&config) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Failed to read config bytes: {}", e);
            return;
        }
    };

    let config = match BridgeConfig::from_bytes(&config_bytes) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Ignoring config: {}", e);
            return;
        }
    };

    if let Ok(level) = config.level_filter() {
        crate::logging::set_level(level);
    }

    match crate::bridge() {
        Some(bridge) => {
            if let Err(e) = bridge.configure(&config) {
                log::error!("Ignoring config: {}", e);
            }
        }
        None => log::error!("JNI: configure called before JNI_OnLoad"),
    }
}
