//! Band files inside Sentinel-2 `.SAFE` products.

use std::path::{Path, PathBuf};

use raster_sampler::list_ext;
use tracing::{debug, info};

use crate::error::{SentinelError, SentinelResult};
use crate::image_types::{ImageType, Resolution};

/// Marker of level-2A products in the product id.
const LEVEL_2A_MARKER: &str = "MSIL2A";

/// Whether `product_id` names a level-2A (bottom-of-atmosphere) product.
pub fn is_level_2a(product_id: &str) -> bool {
    product_id.contains(LEVEL_2A_MARKER)
}

/// File-name labels of the bands composing `image_type`.
///
/// Labels are `B<code>`. Level-2A products store each band at several
/// resolutions, so their labels carry the resolution: `B04_10m`.
pub fn band_labels(product_id: &str, image_type: ImageType, resolution: Resolution) -> Vec<String> {
    let level_2a = is_level_2a(product_id);
    image_type
        .bands()
        .iter()
        .map(|code| {
            if level_2a {
                format!("B{}_{}", code, resolution)
            } else {
                format!("B{}", code)
            }
        })
        .collect()
}

/// JPEG2000 band files of `image_type` in `<data_dir>/<product_id>.SAFE`.
///
/// Files are returned in channel order. For each label the first file (by
/// path) whose name contains it is used.
pub fn product_band_files(
    data_dir: impl AsRef<Path>,
    product_id: &str,
    image_type: ImageType,
    resolution: Resolution,
) -> SentinelResult<Vec<PathBuf>> {
    let product_dir = data_dir.as_ref().join(format!("{}.SAFE", product_id));
    let jp2s = list_ext(&product_dir, "jp2")?;
    debug!(product = %product_id, files = jp2s.len(), "Listed product band files");

    band_labels(product_id, image_type, resolution)
        .into_iter()
        .map(|label| {
            let found = jp2s.iter().find(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().contains(&label))
                    .unwrap_or(false)
            });
            match found {
                Some(path) => {
                    info!(product = %product_id, band = %label, path = %path.display(), "Found band file");
                    Ok(path.clone())
                }
                None => Err(SentinelError::BandFileNotFound {
                    product: product_id.to_string(),
                    label,
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::files;

    #[test]
    fn test_level_1c_labels() {
        let product = files::SENTINEL2_L1C.trim_end_matches(".SAFE");
        assert_eq!(
            band_labels(product, ImageType::TrueColor, Resolution::R10m),
            vec!["B04", "B03", "B02"]
        );
    }

    #[test]
    fn test_level_2a_labels_carry_resolution() {
        let product = files::SENTINEL2_L2A.trim_end_matches(".SAFE");
        assert!(is_level_2a(product));
        assert_eq!(
            band_labels(product, ImageType::Agriculture, Resolution::R20m),
            vec!["B11_20m", "B8A_20m", "B02_20m"]
        );
    }
}
