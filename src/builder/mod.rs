mod ec;
mod qr;

pub(crate) use qr::{Module, QR};

use std::ops::Deref;

use log::{debug, trace};

use crate::common::{
    codec::{encode, encode_with_version},
    ec::GF256,
    error::QRResult,
    mask::{apply_best_mask, compute_total_penalty, MaskPattern},
    metadata::{ECLevel, Version},
};
use crate::Symbol;

/// Configures and builds a QR symbol. EC level defaults to M; version and
/// mask are picked automatically unless forced.
#[derive(Debug, Clone)]
pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        let version = self.version.map_or("Auto".to_string(), |v| v.to_string());
        let mask = self.mask.map_or("Auto".to_string(), |m| m.to_string());
        format!("{{ Version: {version}, Ec level: {:?}, Mask: {mask} }}", self.ec_level)
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<Symbol> {
        debug!("Generating QR {}", self.metadata());
        if let Some(v) = self.version {
            Version::try_from(*v)?;
        }
        if let Some(m) = self.mask {
            MaskPattern::try_from(*m)?;
        }
        if self.data.is_empty() {
            debug!("Empty data, returning blank symbol");
            return Ok(Symbol::empty(self.ec_level));
        }

        // Encode data optimally
        let (encoded_data, version) = match self.version {
            Some(v) => (encode_with_version(self.data, self.ec_level, v)?, v),
            None => encode(self.data, self.ec_level)?,
        };
        debug!("Encoded {} bytes into version {version}", self.data.len());

        // Compute error correction codewords, then interleave data & ecc
        let (data_blocks, ecc_blocks) = ec::ecc(&GF256, encoded_data.data(), version, self.ec_level);
        debug!(
            "Computed {} ecc per block over {} blocks",
            version.ecc_per_block(self.ec_level),
            data_blocks.len()
        );
        let mut payload = Self::interleave(&data_blocks);
        payload.extend(Self::interleave(&ecc_blocks));
        debug_assert_eq!(payload.len(), version.total_codewords(), "Payload size mismatch");
        trace!("Codewords: {payload:02X?}");

        // Construct QR
        let mut qr = QR::new(version, self.ec_level);
        qr.draw_all_function_patterns();
        qr.draw_version_info();
        qr.draw_payload(&payload);
        debug!("Drew function patterns and {} codewords", payload.len());

        let (mask, penalty) = match self.mask {
            Some(m) => {
                qr.apply_mask(m);
                (m, compute_total_penalty(&qr))
            }
            None => apply_best_mask(&mut qr),
        };

        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();
        debug!(
            "QR generated: Version {version}, Ec level {:?}, Mask {mask}, Penalty {penalty}, \
             Error capacity {}, Dark balance {}%",
            self.ec_level,
            Self::ec_capacity(version, self.ec_level),
            dark_modules * 100 / total_modules
        );

        Ok(qr.into_symbol(penalty))
    }

    /// Number of codewords errors the symbol can recover from, less the
    /// misdecode protection codewords of the smallest symbols
    pub fn ec_capacity(version: Version, ec_level: ECLevel) -> usize {
        let p = match (*version, ec_level) {
            (1, ECLevel::L) => 3,
            (1, ECLevel::M) | (2, ECLevel::L) => 2,
            (1, _) | (3, ECLevel::L) => 1,
            _ => 0,
        };

        (version.ecc_codewords(ec_level) - p) / 2
    }

    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}
