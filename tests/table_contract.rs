//! End-to-end contract test: the complete offset map for the Dilithium
//! shape, region by region. The vector kernel indexes the buffer through
//! exactly these offsets, so any drift here is an ABI break.

use dilithium_ntt_consts::prelude::*;

/// Every region of the Dilithium table in declaration order:
/// (name, offset, len), element units.
const EXPECTED: [(&str, usize, usize); 45] = [
    ("zeta_fwd_l0", 0, 2),
    ("zeta_fwd_l1", 2, 4),
    ("zeta_fwd_l2", 6, 8),
    ("zeta_fwd_l3", 14, 16),
    ("zeta_fwd_p0_l4", 30, 8),
    ("zeta_fwd_p0_l5", 38, 16),
    ("zeta_fwd_p0_l6", 54, 64),
    ("zeta_fwd_p0_l7", 118, 64),
    ("zeta_fwd_p1_l4", 182, 8),
    ("zeta_fwd_p1_l5", 190, 16),
    ("zeta_fwd_p1_l6", 206, 64),
    ("zeta_fwd_p1_l7", 270, 64),
    ("zeta_fwd_p2_l4", 334, 8),
    ("zeta_fwd_p2_l5", 342, 16),
    ("zeta_fwd_p2_l6", 358, 64),
    ("zeta_fwd_p2_l7", 422, 64),
    ("zeta_fwd_p3_l4", 486, 8),
    ("zeta_fwd_p3_l5", 494, 16),
    ("zeta_fwd_p3_l6", 510, 64),
    ("zeta_fwd_p3_l7", 574, 64),
    ("zeta_inv_p0_l0", 638, 64),
    ("zeta_inv_p0_l1", 702, 64),
    ("zeta_inv_p0_l2", 766, 16),
    ("zeta_inv_p0_l3", 782, 8),
    ("zeta_inv_p1_l0", 790, 64),
    ("zeta_inv_p1_l1", 854, 64),
    ("zeta_inv_p1_l2", 918, 16),
    ("zeta_inv_p1_l3", 934, 8),
    ("zeta_inv_p2_l0", 942, 64),
    ("zeta_inv_p2_l1", 1006, 64),
    ("zeta_inv_p2_l2", 1070, 16),
    ("zeta_inv_p2_l3", 1086, 8),
    ("zeta_inv_p3_l0", 1094, 64),
    ("zeta_inv_p3_l1", 1158, 64),
    ("zeta_inv_p3_l2", 1222, 16),
    ("zeta_inv_p3_l3", 1238, 8),
    ("zeta_inv_l4", 1246, 16),
    ("zeta_inv_l5", 1262, 8),
    ("zeta_inv_l6", 1270, 4),
    ("zeta_inv_l7", 1274, 2),
    ("mask_1100", 1276, 4),
    ("mask_1010", 1280, 4),
    ("mask_0101", 1284, 4),
    ("mask_2323", 1288, 4),
    ("mask_1032", 1292, 4),
];

#[test]
fn dilithium_offset_map_matches_the_kernel_contract() {
    let layout = TableLayout::generate(NttShape::DILITHIUM).unwrap();
    assert_eq!(EXPECTED.len(), layout.regions().len());

    for (region, (name, offset, len)) in
        layout.regions().iter().zip(EXPECTED)
    {
        assert_eq!(name, region.id.to_string(), "region name");
        assert_eq!(offset, region.offset, "offset of {name}");
        assert_eq!(len, region.len, "length of {name}");
    }

    assert_eq!(1296, layout.total_len());
}

#[test]
fn total_size_is_the_sum_of_all_region_lengths() {
    let layout = TableLayout::generate(NttShape::DILITHIUM).unwrap();
    let sum: usize = layout.regions().iter().map(|region| region.len).sum();
    assert_eq!(sum, layout.total_len());
    assert_eq!(0, layout.regions()[0].offset);
}

#[test]
fn twiddle_regions_have_even_lengths() {
    let layout = TableLayout::generate(NttShape::DILITHIUM).unwrap();
    for region in layout.regions() {
        if region.kind != RegionKind::Mask {
            assert_eq!(0, region.len % 2, "region {}", region.id);
        }
    }
}

#[test]
fn generated_buffer_covers_the_whole_map() {
    let table = ConstTable::generate(NttShape::DILITHIUM).unwrap();
    assert_eq!(table.layout().total_len(), table.data().len());

    // Spot checks against published Dilithium twiddle constants.
    let first = table
        .region_data(RegionId::Twiddle {
            transform: Transform::Forward,
            layer: 0,
            phase: None,
        })
        .unwrap();
    assert_eq!(&[-3572223, -915382907][..], first);

    let rotate = table
        .region_data(RegionId::Mask(LaneMask::RotatePairs))
        .unwrap();
    assert_eq!(&[1, 0, 3, 2][..], rotate);
    assert_eq!(
        &table.data()[1292..1296],
        rotate,
        "rotate-pairs must be the final region"
    );
}

#[test]
fn exported_offset_map_serializes_with_stable_names() {
    let layout = TableLayout::generate(NttShape::DILITHIUM).unwrap();
    let json = serde_json::to_value(&layout).unwrap();
    let regions = json["regions"].as_array().unwrap();
    assert_eq!(45, regions.len());
    assert_eq!("zeta_fwd_l0", regions[0]["id"]);
    assert_eq!(1292, regions[44]["offset"]);
    assert_eq!(1296, json["total_len"]);
}
