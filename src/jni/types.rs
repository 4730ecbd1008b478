//! # JNI Type Conversions
//!
//! Helper conversions for JNI interop.

use jni::objects::JValue;
use jni::sys::{jint, jvalue};

use crate::bridge::contract::CallArg;

/// JNI version reported from `JNI_OnLoad`
pub const JNI_VERSION: jint = jni::sys::JNI_VERSION_1_6;

impl<'local, 'obj_ref> From<CallArg> for JValue<'local, 'obj_ref> {
    fn from(arg: CallArg) -> Self {
        match arg {
            CallArg::Int(v) => JValue::Int(v),
            CallArg::Long(v) => JValue::Long(v),
        }
    }
}

/// Convert call arguments to raw `jvalue`s for an unchecked call
pub fn to_jvalues(args: &[CallArg]) -> Vec<jvalue> {
    args.iter().map(|&arg| JValue::from(arg).as_jni()).collect()
}
