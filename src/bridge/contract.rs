//! # Call Contract
//!
//! The two method shapes the managed target must expose, and the values
//! passed to them.

use std::ffi::c_void;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::BridgeConfig;
use crate::error::ConfigError;

/// How the opaque texture handle crosses into the managed runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandleEncoding {
    /// Full 64-bit value (`long`)
    #[default]
    Long,
    /// Low 32 bits only (`int`), for adapters built against the narrow signature
    Int,
}

impl HandleEncoding {
    /// JVM descriptor of the register method for this encoding
    pub fn register_signature(self) -> &'static str {
        match self {
            HandleEncoding::Long => "(JII)V",
            HandleEncoding::Int => "(III)V",
        }
    }
}

/// An engine-supplied graphics resource handle, treated as an untyped token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TextureHandle(pub u64);

impl TextureHandle {
    /// Take the numeric value of a native pointer
    pub fn from_ptr(ptr: *mut c_void) -> Self {
        TextureHandle(ptr as usize as u64)
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    pub fn to_long(&self) -> i64 {
        self.0 as i64
    }

    /// Low 32 bits as a signed int. Returns `None` if higher bits are set.
    pub fn to_int(&self) -> Option<i32> {
        u32::try_from(self.0).ok().map(|v| v as i32)
    }

    pub fn to_int_truncated(&self) -> i32 {
        self.0 as u32 as i32
    }
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// A single argument of a bridged call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallArg {
    Int(i32),
    Long(i64),
}

impl CallArg {
    /// JVM type descriptor of this argument
    pub fn descriptor(&self) -> char {
        match self {
            CallArg::Int(_) => 'I',
            CallArg::Long(_) => 'J',
        }
    }
}

/// A managed method looked up by name and descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSpec {
    name: String,
    signature: String,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Parameter part of the descriptor, e.g. `JII` for `(JII)V`
    pub fn parameters(&self) -> &str {
        let start = self.signature.find('(').map(|i| i + 1).unwrap_or(0);
        let end = self.signature.find(')').unwrap_or(start);
        self.signature.get(start..end).unwrap_or("")
    }

    /// Whether `args` match the parameter descriptors one-to-one.
    /// Only primitive descriptors are understood.
    pub fn accepts(&self, args: &[CallArg]) -> bool {
        let params = self.parameters();
        params.len() == args.len()
            && params.chars().zip(args).all(|(p, a)| p == a.descriptor())
    }
}

impl fmt::Display for MethodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.signature)
    }
}

/// The two operations the managed target is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    pub init_context: MethodSpec,
    pub register_texture: MethodSpec,
    pub encoding: HandleEncoding,
}

impl Default for Contract {
    fn default() -> Self {
        Self::build("initContext", "registerTexture", HandleEncoding::default())
    }
}

impl Contract {
    fn build(init_context: &str, register_texture: &str, encoding: HandleEncoding) -> Self {
        Self {
            init_context: MethodSpec::new(init_context, "()V"),
            register_texture: MethodSpec::new(register_texture, encoding.register_signature()),
            encoding,
        }
    }

    /// Build the contract named by a configuration
    pub fn from_config(config: &BridgeConfig) -> Result<Self, ConfigError> {
        validate_method_name("initContextMethod", &config.init_context_method)?;
        validate_method_name("registerTextureMethod", &config.register_texture_method)?;

        Ok(Self::build(
            &config.init_context_method,
            &config.register_texture_method,
            config.handle_encoding,
        ))
    }

    /// Arguments of a register call under the configured encoding
    pub fn register_args(&self, handle: TextureHandle, width: i32, height: i32) -> [CallArg; 3] {
        let handle = match self.encoding {
            HandleEncoding::Long => CallArg::Long(handle.to_long()),
            HandleEncoding::Int => {
                if handle.to_int().is_none() {
                    log::warn!("Texture handle {} does not fit in 32 bits, truncating", handle);
                }
                CallArg::Int(handle.to_int_truncated())
            }
        };
        [handle, CallArg::Int(width), CallArg::Int(height)]
    }
}

fn validate_method_name(field: &'static str, name: &str) -> Result<(), ConfigError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value: name.to_string(),
        })
    }
}
