//! GeoTIFF handle with chunk-level point sampling.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use geo_common::{BoundingBox, SamplePoint};
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;
use tracing::debug;

use crate::error::{GeoTiffError, GeoTiffResult};
use crate::metadata::{parse_nodata, GdalMetadata, TAG_GDAL_METADATA, TAG_GDAL_NODATA};
use crate::transform::GeoTransform;

/// An open GeoTIFF file.
///
/// Only the chunks (tiles or strips) touched by sampled points are decoded.
/// Decoded chunks are kept for the lifetime of the handle, which is dropped
/// as soon as the owning worker finishes with the file.
pub struct GeoTiffSource {
    path: PathBuf,
    decoder: Decoder<BufReader<File>>,
    width: usize,
    height: usize,
    samples_per_pixel: usize,
    chunk_width: usize,
    chunk_height: usize,
    chunks_across: usize,
    transform: GeoTransform,
    descriptions: Vec<Option<String>>,
    nodata: Option<f64>,
    chunks: HashMap<u32, Vec<f64>>,
}

impl GeoTiffSource {
    /// Open a GeoTIFF and read its structural metadata.
    pub fn open(path: impl AsRef<Path>) -> GeoTiffResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let mut decoder = Decoder::new(BufReader::new(file))?.with_limits(Limits::unlimited());

        let (width, height) = decoder.dimensions()?;
        let width = width as usize;
        let height = height as usize;
        if width == 0 || height == 0 {
            return Err(GeoTiffError::InvalidFormat(format!(
                "empty image ({}x{})",
                width, height
            )));
        }

        // Fails early for photometric/sample layouts the decoder cannot handle
        decoder.colortype()?;

        let samples_per_pixel = decoder.get_tag_u32(Tag::SamplesPerPixel).unwrap_or(1) as usize;
        let planar = decoder.get_tag_u32(Tag::PlanarConfiguration).unwrap_or(1);
        if planar == 2 && samples_per_pixel > 1 {
            return Err(GeoTiffError::Unsupported(
                "separate-plane (PlanarConfiguration=2) multi-band images".to_string(),
            ));
        }

        let (chunk_width, chunk_height) = decoder.chunk_dimensions();
        let chunk_width = chunk_width.max(1) as usize;
        let chunk_height = chunk_height.max(1) as usize;
        let chunks_across = width.div_ceil(chunk_width);

        let transform = read_transform(&mut decoder)?;

        let descriptions = match decoder
            .get_tag_ascii_string(Tag::from_u16_exhaustive(TAG_GDAL_METADATA))
            .ok()
        {
            Some(xml) => GdalMetadata::parse(&xml)?.band_descriptions(samples_per_pixel),
            None => vec![None; samples_per_pixel],
        };

        let nodata = decoder
            .get_tag_ascii_string(Tag::from_u16_exhaustive(TAG_GDAL_NODATA))
            .ok()
            .and_then(|s| parse_nodata(&s));

        debug!(
            path = %path.display(),
            width,
            height,
            bands = samples_per_pixel,
            chunk_width,
            chunk_height,
            "Opened GeoTIFF"
        );

        Ok(Self {
            path,
            decoder,
            width,
            height,
            samples_per_pixel,
            chunk_width,
            chunk_height,
            chunks_across,
            transform,
            descriptions,
            nodata,
            chunks: HashMap::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Image size as (width, height) in pixels.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn band_count(&self) -> usize {
        self.samples_per_pixel
    }

    /// Per-band descriptions from the GDAL metadata tag.
    pub fn descriptions(&self) -> &[Option<String>] {
        &self.descriptions
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// Extent covered by the image's outer pixel edges.
    pub fn bounds(&self) -> BoundingBox {
        let (w, h) = (self.width as f64, self.height as f64);
        let corners = [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)]
            .into_iter()
            .map(|(c, r)| self.transform.pixel_to_world(c, r));
        BoundingBox::from_corners(corners).unwrap_or(BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }

    /// Pixel (column, row) containing a world coordinate, if inside the image.
    pub fn pixel_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (col, row) = self.transform.world_to_pixel(x, y)?;
        let (col, row) = (col.floor(), row.floor());
        if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then_some((col, row))
    }

    /// All band values at one world coordinate.
    ///
    /// Points outside the image give `NaN` for every band. Inside the image,
    /// each band whose value equals the nodata value gives `NaN` on its own.
    pub fn sample_point(&mut self, x: f64, y: f64) -> GeoTiffResult<Vec<f64>> {
        let Some((col, row)) = self.pixel_at(x, y) else {
            return Ok(vec![f64::NAN; self.samples_per_pixel]);
        };

        let chunk_col = col / self.chunk_width;
        let chunk_row = row / self.chunk_height;
        let chunk_index = (chunk_row * self.chunks_across + chunk_col) as u32;
        let (data_width, _) = self.decoder.chunk_data_dimensions(chunk_index);
        let data_width = data_width as usize;

        let spp = self.samples_per_pixel;
        let nodata = self.nodata;
        let within_x = col - chunk_col * self.chunk_width;
        let within_y = row - chunk_row * self.chunk_height;
        let offset = (within_y * data_width + within_x) * spp;

        let chunk = self.chunk(chunk_index)?;
        let values = chunk.get(offset..offset + spp).ok_or_else(|| {
            GeoTiffError::InvalidFormat(format!(
                "chunk {} too short for pixel ({}, {})",
                chunk_index, col, row
            ))
        })?;

        Ok(values
            .iter()
            .map(|&v| match nodata {
                Some(nd) if v == nd => f64::NAN,
                _ => v,
            })
            .collect())
    }

    /// Sample every band at each point, in point order.
    pub fn sample(&mut self, points: &[SamplePoint]) -> GeoTiffResult<Vec<Vec<f64>>> {
        points.iter().map(|p| self.sample_point(p.x, p.y)).collect()
    }

    fn chunk(&mut self, index: u32) -> GeoTiffResult<&Vec<f64>> {
        if !self.chunks.contains_key(&index) {
            let decoded = self.decoder.read_chunk(index)?;
            self.chunks.insert(index, decoding_result_to_f64(decoded));
        }
        self.chunks
            .get(&index)
            .ok_or_else(|| GeoTiffError::InvalidFormat(format!("chunk {} missing", index)))
    }
}

fn read_transform<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
) -> GeoTiffResult<GeoTransform> {
    if let Ok(matrix) = decoder.get_tag_f64_vec(Tag::ModelTransformationTag) {
        return GeoTransform::from_model_transformation(&matrix);
    }

    let scale = decoder.get_tag_f64_vec(Tag::ModelPixelScaleTag).ok();
    let tiepoint = decoder.get_tag_f64_vec(Tag::ModelTiepointTag).ok();
    match (scale, tiepoint) {
        (Some(scale), Some(tiepoint)) => GeoTransform::from_scale_and_tiepoint(&scale, &tiepoint),
        _ => Ok(GeoTransform::identity()),
    }
}

fn decoding_result_to_f64(result: DecodingResult) -> Vec<f64> {
    match result {
        DecodingResult::U8(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::U16(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::U32(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::U64(data) => data.into_iter().map(|v| v as f64).collect(),
        DecodingResult::I8(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::I16(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::I32(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::I64(data) => data.into_iter().map(|v| v as f64).collect(),
        DecodingResult::F16(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::F32(data) => data.into_iter().map(f64::from).collect(),
        DecodingResult::F64(data) => data,
    }
}
