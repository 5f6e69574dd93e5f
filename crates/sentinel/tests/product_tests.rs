//! Band-file lookup inside synthetic `.SAFE` product trees.

use std::fs;
use std::path::Path;

use sentinel::{product_band_files, ImageType, Resolution, SentinelError};
use test_utils::{files, temp_test_dir};

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

#[test]
fn test_level_1c_true_color_files_in_channel_order() {
    let dir = temp_test_dir();
    let product = files::SENTINEL2_L1C.trim_end_matches(".SAFE");
    let img = dir
        .path()
        .join(files::SENTINEL2_L1C)
        .join("GRANULE/L1C_T53NMJ/IMG_DATA");
    for band in ["B02", "B03", "B04", "B08", "TCI"] {
        touch(&img.join(format!("T53NMJ_20170105T013442_{}.jp2", band)));
    }
    touch(&img.join("T53NMJ_20170105T013442_B04.xml"));

    let found = product_band_files(dir.path(), product, ImageType::TrueColor, Resolution::R10m)
        .unwrap();
    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "T53NMJ_20170105T013442_B04.jp2",
            "T53NMJ_20170105T013442_B03.jp2",
            "T53NMJ_20170105T013442_B02.jp2",
        ]
    );
}

#[test]
fn test_level_2a_selects_requested_resolution() {
    let dir = temp_test_dir();
    let product = files::SENTINEL2_L2A.trim_end_matches(".SAFE");
    let granule = dir.path().join(files::SENTINEL2_L2A).join("GRANULE/L2A_T31UFU");
    for res in ["R10m", "R20m", "R60m"] {
        let r = &res[1..];
        for band in ["B02", "B03", "B04", "B8A", "B11", "B12"] {
            touch(&granule.join(format!("IMG_DATA/{}/T31UFU_{}_{}.jp2", res, band, r)));
        }
    }

    let found = product_band_files(dir.path(), product, ImageType::Agriculture, Resolution::R20m)
        .unwrap();
    assert_eq!(found.len(), 3);
    assert!(found[0].ends_with("IMG_DATA/R20m/T31UFU_B11_20m.jp2"));
    assert!(found[1].ends_with("IMG_DATA/R20m/T31UFU_B8A_20m.jp2"));
    assert!(found[2].ends_with("IMG_DATA/R20m/T31UFU_B02_20m.jp2"));
}

#[test]
fn test_missing_band_file() {
    let dir = temp_test_dir();
    let product = files::SENTINEL2_L1C.trim_end_matches(".SAFE");
    touch(&dir.path().join(files::SENTINEL2_L1C).join("IMG_DATA/x_B04.jp2"));

    let err = product_band_files(dir.path(), product, ImageType::TrueColor, Resolution::R10m)
        .unwrap_err();
    match err {
        SentinelError::BandFileNotFound { label, .. } => assert_eq!(label, "B03"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_product_directory() {
    let dir = temp_test_dir();
    let err = product_band_files(dir.path(), "S2A_MSIL1C_nothing", ImageType::TrueColor, Resolution::R10m)
        .unwrap_err();
    assert!(matches!(err, SentinelError::Discovery(_)));
}
