//! WebAssembly bindings for the register calculator.
//!
//! This module provides JavaScript-friendly wrappers around [`Register`].

use wasm_bindgen::prelude::*;
use crate::{BitRange, Register, Rendering};
use crate::register::{parse_int, parse_unsigned};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly register wrapper.
#[wasm_bindgen]
pub struct WasmRegister {
    register: Register,
}

#[wasm_bindgen]
impl WasmRegister {
    /// Create a zeroed register of `width` bits.
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize) -> Result<WasmRegister, JsError> {
        let register = Register::new(width).map_err(to_js)?;
        Ok(Self { register })
    }

    /// Register width in bits.
    #[wasm_bindgen]
    pub fn width(&self) -> usize {
        self.register.width()
    }

    /// Full bit string, MSB first.
    #[wasm_bindgen]
    pub fn bits(&self) -> String {
        self.register.to_bit_string()
    }

    /// Replace the whole value from a literal like `"0x1f"`.
    #[wasm_bindgen]
    pub fn assign(&mut self, value: &str) -> Result<(), JsError> {
        let value = parse_unsigned(value).map_err(to_js)?;
        self.register.assign(value).map_err(to_js)
    }

    /// Set the bits of a range like `"4:7"` to 1.
    #[wasm_bindgen]
    pub fn set(&mut self, range: &str) -> Result<(), JsError> {
        let range = self.range(range)?;
        self.register.set_range(range).map_err(to_js)
    }

    /// Clear the bits of a range to 0.
    #[wasm_bindgen]
    pub fn clear(&mut self, range: &str) -> Result<(), JsError> {
        let range = self.range(range)?;
        self.register.clear_range(range).map_err(to_js)
    }

    /// Write a value into a range.
    #[wasm_bindgen]
    pub fn write(&mut self, range: &str, value: &str) -> Result<(), JsError> {
        let range = self.range(range)?;
        let value = parse_int(value).map_err(to_js)?;
        self.register.write(range, value).map_err(to_js)
    }

    /// Whole value as JSON: `{"binary":…,"decimal":…,"hex":…}`.
    #[wasm_bindgen]
    pub fn render_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&Rendering::of(&self.register)).map_err(to_js)
    }

    /// A field as JSON, in the same shape as [`WasmRegister::render_json`].
    #[wasm_bindgen]
    pub fn field_json(&self, range: &str) -> Result<String, JsError> {
        let range = self.range(range)?;
        let field = self.register.field(range).map_err(to_js)?;
        serde_json::to_string(&Rendering::of(&field)).map_err(to_js)
    }

    /// Indices of bits equal to `target`, ascending.
    #[wasm_bindgen]
    pub fn offsets(&self, target: bool) -> js_sys::Uint32Array {
        let offsets: Vec<u32> = self.register.offsets(target).into_iter().map(|i| i as u32).collect();
        js_sys::Uint32Array::from(offsets.as_slice())
    }
}

impl WasmRegister {
    fn range(&self, text: &str) -> Result<BitRange, JsError> {
        BitRange::parse(text, self.register.width()).map_err(to_js)
    }
}

/// Group a bit string into nibbles.
#[wasm_bindgen]
pub fn wasm_decorate(bits: &str) -> String {
    crate::decorate(bits)
}

fn to_js(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}
