//! WebAssembly bindings for credential validation.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { validate_credential, detect_region } from 'wwc_validator';
//!
//! await init();
//!
//! const result = validate_credential("WWC-1234567-12", "2026-03-25");
//! if (result.valid) {
//!     console.log(`${result.region_name}: ${result.display_icon} ${result.status}`);
//! } else {
//!     result.messages.forEach(m => console.log(m));
//! }
//!
//! detect_region("blue-12345-2024-1");  // "QLD"
//! ```

#![cfg(feature = "wasm")]

use crate::display::status_display_for;
use crate::expiry::{check_expiry_now, parse_expiry_date};
use crate::validate::{validate_at, ValidationResult};
use wasm_bindgen::prelude::*;

/// Result of credential validation, returned to JavaScript.
#[wasm_bindgen]
pub struct CredentialResult {
    inner: ValidationResult,
}

fn messages_array<I: IntoIterator<Item = String>>(messages: I) -> js_sys::Array {
    messages.into_iter().map(|m| JsValue::from_str(&m)).collect()
}

#[wasm_bindgen]
impl CredentialResult {
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.inner.is_valid
    }

    /// Region code, e.g. `"VIC"`.
    #[wasm_bindgen(getter)]
    pub fn region(&self) -> Option<String> {
        self.inner.region.map(|r| r.code().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn region_name(&self) -> Option<String> {
        self.inner.region_name().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.inner.status.label().to_string()
    }

    /// Error and warning messages as an array of strings.
    #[wasm_bindgen(getter)]
    pub fn messages(&self) -> js_sys::Array {
        messages_array(self.inner.messages())
    }

    #[wasm_bindgen(getter)]
    pub fn normalized_number(&self) -> Option<String> {
        self.inner.normalized_number.clone()
    }

    /// Parsed expiry date as `YYYY-MM-DD`.
    #[wasm_bindgen(getter)]
    pub fn expiry_date(&self) -> Option<String> {
        self.inner.expiry_date.map(|d| d.format("%Y-%m-%d").to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn days_until_expiry(&self) -> Option<f64> {
        self.inner.days_until_expiry.map(|d| d as f64)
    }

    #[wasm_bindgen(getter)]
    pub fn display_label(&self) -> String {
        self.inner.display().label.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn display_color(&self) -> String {
        self.inner.display().color.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn display_icon(&self) -> String {
        self.inner.display().icon.to_string()
    }
}

/// Validates a credential number and expiry date as of the browser's local
/// date.
///
/// # Example
/// ```javascript
/// const result = validate_credential("SA12345678", "2019-10-24");
/// console.log(result.valid);   // false
/// console.log(result.status);  // "Expired"
/// ```
#[wasm_bindgen]
pub fn validate_credential(number: &str, expiry: &str) -> CredentialResult {
    CredentialResult {
        inner: crate::validate(number, expiry),
    }
}

/// Validates a credential as of a given `YYYY-MM-DD` date.
#[wasm_bindgen]
pub fn validate_credential_at(
    number: &str,
    expiry: &str,
    today: &str,
) -> Result<CredentialResult, JsValue> {
    let today = parse_expiry_date(today).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(CredentialResult {
        inner: validate_at(number, expiry, today),
    })
}

/// Quick check if a credential is currently acceptable.
#[wasm_bindgen]
pub fn is_valid(number: &str, expiry: &str) -> bool {
    crate::is_valid(number, expiry)
}

/// Detects the region code of a credential number.
///
/// # Example
/// ```javascript
/// detect_region("1234567/12");  // "WA"
/// detect_region("nope");        // undefined
/// ```
#[wasm_bindgen]
pub fn detect_region(number: &str) -> Option<String> {
    crate::detect::detect_region(number).map(|r| r.code().to_string())
}

/// Returns the `CODE: example` list of supported formats.
#[wasm_bindgen]
pub fn supported_formats() -> String {
    crate::FormatTable::builtin().supported_formats()
}

/// Result of an expiry-only check.
#[wasm_bindgen]
pub struct ExpiryResult {
    valid: bool,
    status: String,
    days_until_expiry: Option<f64>,
    messages: Vec<String>,
}

#[wasm_bindgen]
impl ExpiryResult {
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.valid
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.status.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn days_until_expiry(&self) -> Option<f64> {
        self.days_until_expiry
    }

    #[wasm_bindgen(getter)]
    pub fn messages(&self) -> js_sys::Array {
        messages_array(self.messages.iter().cloned())
    }
}

/// Checks an expiry date against the browser's local date.
#[wasm_bindgen]
pub fn check_expiry(expiry: &str) -> ExpiryResult {
    let check = check_expiry_now(expiry);
    ExpiryResult {
        valid: check.is_valid,
        status: check.status.label().to_string(),
        days_until_expiry: check.days_until_expiry.map(|d| d as f64),
        messages: check.errors.iter().map(|e| e.to_string()).collect(),
    }
}

/// Returns the CSS classes for a status label as `[bg, text]`.
///
/// Unknown labels get the gray Unknown classes.
#[wasm_bindgen]
pub fn status_classes(status: &str) -> js_sys::Array {
    let display = status_display_for(status);
    messages_array([display.bg_class.to_string(), display.text_class.to_string()])
}

/// Batch validates `[number, expiry]` pairs.
///
/// Entries that are not two-element arrays of strings are skipped.
///
/// # Example
/// ```javascript
/// const results = validate_batch([["1234567", "2030-01-01"], ["REG12345678", ""]]);
/// results.forEach(r => console.log(r.valid));
/// ```
#[wasm_bindgen]
pub fn validate_batch(credentials: js_sys::Array) -> js_sys::Array {
    let results = js_sys::Array::new();

    for entry in credentials.iter() {
        if !js_sys::Array::is_array(&entry) {
            continue;
        }
        let pair = js_sys::Array::from(&entry);
        if let (Some(number), Some(expiry)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            results.push(&JsValue::from(validate_credential(&number, &expiry)));
        }
    }

    results
}
