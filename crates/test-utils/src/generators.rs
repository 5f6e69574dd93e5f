//! Test data generators for synthetic rasters.
//!
//! These generators create predictable, verifiable pixel patterns and write
//! them as small georeferenced GeoTIFFs that the readers under test can open.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;
use tiff::TiffResult;

/// GDAL metadata TIFF tag.
const TAG_GDAL_METADATA: u16 = 42112;
/// GDAL nodata TIFF tag.
const TAG_GDAL_NODATA: u16 = 42113;

/// Creates an interleaved multi-band grid.
///
/// The value of band `b` at (col, row) is `b * 100_000 + col * 1000 + row`,
/// stored pixel-major (all bands of pixel 0, then pixel 1, ...).
pub fn create_band_stack(width: usize, height: usize, bands: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height * bands);
    for row in 0..height {
        for col in 0..width {
            for band in 0..bands {
                data.push((band * 100_000 + col * 1000 + row) as f32);
            }
        }
    }
    data
}

/// Expected value of [`create_band_stack`] at a pixel.
pub fn band_stack_value(band: usize, col: usize, row: usize) -> f64 {
    (band * 100_000 + col * 1000 + row) as f64
}

/// Description of a synthetic GeoTIFF.
#[derive(Debug, Clone)]
pub struct GeoTiffSpec {
    pub width: u32,
    pub height: u32,
    /// 1 (grayscale) or 3 (RGB) interleaved float bands
    pub bands: usize,
    /// Pixel-major sample values, `width * height * bands` long
    pub data: Vec<f32>,
    /// Upper-left corner in world coordinates; `None` writes no georeferencing
    pub origin: Option<(f64, f64)>,
    pub pixel_size: (f64, f64),
    /// Per-band GDAL descriptions
    pub descriptions: Vec<Option<String>>,
    pub nodata: Option<f64>,
}

impl GeoTiffSpec {
    /// A georeferenced grid filled with [`create_band_stack`] values.
    pub fn band_stack(width: u32, height: u32, bands: usize) -> Self {
        Self {
            width,
            height,
            bands,
            data: create_band_stack(width as usize, height as usize, bands),
            origin: Some((500_000.0, 7_000_000.0)),
            pixel_size: (10.0, 10.0),
            descriptions: vec![None; bands],
            nodata: None,
        }
    }

    pub fn with_descriptions<S: Into<String>>(mut self, descriptions: Vec<Option<S>>) -> Self {
        self.descriptions = descriptions.into_iter().map(|d| d.map(Into::into)).collect();
        self
    }

    pub fn with_nodata(mut self, nodata: f64) -> Self {
        self.nodata = Some(nodata);
        self
    }

    pub fn without_georeference(mut self) -> Self {
        self.origin = None;
        self
    }

    /// World coordinate of the centre of pixel (col, row).
    pub fn pixel_center(&self, col: u32, row: u32) -> (f64, f64) {
        let (ox, oy) = self.origin.unwrap_or((0.0, 0.0));
        let (sx, sy) = match self.origin {
            Some(_) => (self.pixel_size.0, -self.pixel_size.1),
            None => (1.0, 1.0),
        };
        (
            ox + (col as f64 + 0.5) * sx,
            oy + (row as f64 + 0.5) * sy,
        )
    }
}

/// Build the GDAL metadata XML document for band descriptions.
pub fn gdal_metadata_xml(descriptions: &[Option<String>]) -> String {
    let mut xml = String::from("<GDALMetadata>\n");
    for (i, d) in descriptions.iter().enumerate() {
        if let Some(d) = d {
            xml.push_str(&format!(
                "  <Item name=\"DESCRIPTION\" sample=\"{}\" role=\"description\">{}</Item>\n",
                i, d
            ));
        }
    }
    xml.push_str("</GDALMetadata>");
    xml
}

/// Write a synthetic GeoTIFF to `path`.
///
/// Panics if `spec.bands` is not 1 or 3.
pub fn write_geotiff(path: impl AsRef<Path>, spec: &GeoTiffSpec) -> TiffResult<()> {
    let file = BufWriter::new(File::create(path.as_ref())?);
    let mut encoder = TiffEncoder::new(file)?;

    let metadata = spec
        .descriptions
        .iter()
        .any(Option::is_some)
        .then(|| gdal_metadata_xml(&spec.descriptions));
    let nodata = spec.nodata.map(|v| v.to_string());

    macro_rules! write_image {
        ($color:ty) => {{
            let mut image = encoder.new_image::<$color>(spec.width, spec.height)?;
            if let Some((ox, oy)) = spec.origin {
                let (sx, sy) = spec.pixel_size;
                image
                    .encoder()
                    .write_tag(Tag::ModelPixelScaleTag, &[sx, sy, 0.0][..])?;
                image
                    .encoder()
                    .write_tag(Tag::ModelTiepointTag, &[0.0, 0.0, 0.0, ox, oy, 0.0][..])?;
            }
            if let Some(xml) = &metadata {
                image
                    .encoder()
                    .write_tag(Tag::Unknown(TAG_GDAL_METADATA), xml.as_str())?;
            }
            if let Some(nodata) = &nodata {
                image
                    .encoder()
                    .write_tag(Tag::Unknown(TAG_GDAL_NODATA), nodata.as_str())?;
            }
            image.write_data(&spec.data)?;
        }};
    }

    match spec.bands {
        1 => write_image!(colortype::Gray32Float),
        3 => write_image!(colortype::RGB32Float),
        n => panic!("write_geotiff supports 1 or 3 bands, got {}", n),
    }

    Ok(())
}
