//! # qrcraft
//!
//! A Rust library for encoding text into standard QR code symbols (ISO/IEC 18004, versions 1 to
//! 40) with Reed-Solomon error correction, automatic version selection and penalty-scored masking.
//!
//! ## Features
//!
//! - **Mode selection**: numeric, alphanumeric or byte mode, whichever is most compact
//! - **Version selection**: smallest of the 40 versions the payload fits in, or a forced one
//! - **Reed-Solomon Error Correction**: block splitting and interleaving for levels L, M, Q, H
//! - **Masking**: all 8 masks scored with the 4 standard penalty rules, lowest wins
//! - **Content formatting**: URL, e-mail, SMS, Wi-Fi, vCard, calendar event and geo payloads
//!
//! ## Quick Start
//!
//! ```rust
//! use qrcraft::{encode, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = encode("https://example.com", ECLevel::M)?;
//! assert_eq!(symbol.size(), 25);
//! println!("{}", symbol.to_str(1));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrcraft::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = QRBuilder::new(b"Hello, World!")
//!     .version(Version::new(3))       // if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)           // if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3))      // if not provided, finds best mask based on penalty score
//!     .build()?;
//! assert_eq!(symbol.size(), 29);
//! # Ok(())
//! # }
//! ```
//!
//! ### Formatted content
//!
//! ```rust
//! use qrcraft::{content::{Content, WifiSecurity}, encode, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let wifi = Content::Wifi {
//!     ssid: "Home".into(),
//!     password: "secret".into(),
//!     security: WifiSecurity::Wpa,
//!     hidden: false,
//! };
//! let symbol = encode(&wifi.to_string(), ECLevel::H)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Cargo features
//! - `parallel`: evaluates the 8 mask candidates on the rayon thread pool. The chosen mask is
//!   the same as the sequential search.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
pub mod content;
pub mod region;
mod symbol;

pub use builder::QRBuilder;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};
pub use symbol::Symbol;

/// Encodes the content at the given error correction level into the smallest
/// version that holds it, with the lowest penalty mask. Empty content yields
/// a blank symbol of size 0.
pub fn encode(content: &str, ec_level: ECLevel) -> QRResult<Symbol> {
    QRBuilder::new(content.as_bytes()).ec_level(ec_level).build()
}

#[cfg(test)]
mod encode_tests {
    use super::{encode, ECLevel, QRError, Version};

    #[test]
    fn test_encode_url() {
        let symbol = encode("https://example.com", ECLevel::M).unwrap();
        assert_eq!(symbol.version(), Version::new(2));
        assert_eq!(symbol.size(), 25);
        assert_eq!(symbol.penalty(), 440);
    }

    #[test]
    fn test_encode_empty() {
        let symbol = encode("", ECLevel::H).unwrap();
        assert_eq!(symbol.size(), 0);
        assert_eq!(symbol.ec_level(), ECLevel::H);
    }

    #[test]
    fn test_encode_too_long() {
        let data = "a".repeat(2954);
        assert_eq!(encode(&data, ECLevel::L), Err(QRError::DataTooLong));
        assert!(encode(&data[..2953], ECLevel::L).is_ok());
    }
}
