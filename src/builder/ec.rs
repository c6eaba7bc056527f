use crate::common::{
    ec::GaloisField,
    metadata::{ECLevel, Version},
};

// ECC: Error Correction Codeword generator
pub fn ecc<'a>(
    gf: &GaloisField,
    data: &'a [u8],
    version: Version,
    ec_level: ECLevel,
) -> (Vec<&'a [u8]>, Vec<Vec<u8>>) {
    let data_blocks = blockify(data, version, ec_level);

    // Every block of a symbol shares the same generator
    let gen_poly = gf.generator_poly(version.ecc_per_block(ec_level));
    let ecc_blocks =
        data_blocks.iter().map(|b| ecc_per_block(gf, b, &gen_poly)).collect::<Vec<_>>();

    (data_blocks, ecc_blocks)
}

pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let (block1_size, block1_count, block2_size, block2_count) =
        version.data_codewords_per_block(ec_level);

    let total_blocks = block1_count + block2_count;
    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;

    assert_eq!(
        total_size,
        data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut data_blocks = Vec::with_capacity(total_blocks);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_size > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block2_size));
    }
    data_blocks
}

// Performs polynomial long division with data polynomial(num)
// and generator polynomial(den) to compute remainder polynomial,
// the coefficients of which are the ecc
fn ecc_per_block(gf: &GaloisField, block: &[u8], gen_poly: &[u8]) -> Vec<u8> {
    let len = block.len();
    let ecc_count = gen_poly.len() - 1;

    let mut res = block.to_vec();
    res.resize(len + ecc_count, 0);

    for i in 0..len {
        let lead_coeff = res[i];
        if lead_coeff == 0 {
            continue;
        }

        for (u, &v) in res[i + 1..].iter_mut().zip(gen_poly[1..].iter()) {
            *u ^= gf.mul(v, lead_coeff);
        }
    }

    res.split_off(len)
}
