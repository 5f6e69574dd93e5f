//! End-to-end sampling of GeoTIFF stacks written to a temp directory.

use chrono::{TimeZone, Utc};
use raster_sampler::{list_ext, GeoTiffOpener, SampleError, SamplerConfig, SamplerPool};
use test_utils::{
    assert_approx_eq, band_stack_value, bands, files, points, temp_test_dir, write_geotiff,
    GeoTiffSpec,
};

fn write_stack(dir: &tempfile::TempDir, names: &[&str], spec: &GeoTiffSpec) {
    for name in names {
        write_geotiff(dir.path().join(name), spec).unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sample_geotiff_stack() {
    let dir = temp_test_dir();
    let spec = GeoTiffSpec::band_stack(8, 8, 3)
        .with_descriptions(bands::RGB.iter().map(|name| Some(*name)).collect());
    write_stack(
        &dir,
        &["rgb_20120107.tif", "rgb_20120105.tif", "rgb_20120106.tif"],
        &spec,
    );

    let files = list_ext(dir.path(), "tif").unwrap();
    let pool = SamplerPool::new(GeoTiffOpener, SamplerConfig::default()).unwrap();

    let (x, y) = spec.pixel_center(2, 1);
    let table = pool.sample_files(&files, (x, y), None).await.unwrap();

    assert_eq!(table.bands(), &bands::RGB);
    assert_eq!(table.len(), 3);
    assert!(table.is_sorted());
    assert_eq!(
        table.records()[0].timestamp,
        Some(Utc.with_ymd_and_hms(2012, 1, 5, 0, 0, 0).unwrap())
    );
    for row in 0..3 {
        assert_approx_eq!(table.value(row, "green").unwrap(), band_stack_value(1, 2, 1), 1e-3);
    }
}

#[tokio::test]
async fn test_sample_series_with_outside_point() {
    let dir = temp_test_dir();
    let spec = GeoTiffSpec::band_stack(4, 4, 1);
    write_stack(&dir, &["dem_20120105.tif"], &spec);

    let files = list_ext(dir.path(), "tif").unwrap();
    let pool = SamplerPool::new(GeoTiffOpener, SamplerConfig::with_workers(1)).unwrap();

    let (x0, y0) = spec.pixel_center(0, 3);
    let (ox, oy) = points::OUTSIDE;
    let table = pool
        .sample_files(&files, (vec![x0, ox], vec![y0, oy]), None)
        .await
        .unwrap();

    assert_eq!(table.bands(), &["band_0"]);
    // Sorted by x: the outside point comes first
    assert!(table.records()[0].values[0].is_nan());
    assert_approx_eq!(table.records()[1].values[0], band_stack_value(0, 0, 3), 1e-3);
}

#[tokio::test]
async fn test_series_across_timestamped_and_untimestamped_files() {
    let dir = temp_test_dir();
    let spec = GeoTiffSpec::band_stack(4, 4, 3);
    write_stack(&dir, &[files::WITHOUT_TIMESTAMP, files::WITH_TIMESTAMP], &spec);

    let files = list_ext(dir.path(), "tif").unwrap();
    let pool = SamplerPool::new(GeoTiffOpener, SamplerConfig::default()).unwrap();
    let table = pool
        .sample_files(&files, (points::SERIES_X.to_vec(), points::SERIES_Y.to_vec()), None)
        .await
        .unwrap();

    assert_eq!(table.bands(), &bands::GENERATED_3);
    assert_eq!(table.len(), 6);
    assert!(table.is_sorted());

    let stamped = Utc.with_ymd_and_hms(2012, 1, 5, 8, 42, 0).unwrap();
    let records = table.records();
    assert!(records[..3].iter().all(|r| r.timestamp == Some(stamped)));
    assert!(records[3..].iter().all(|r| r.timestamp.is_none()));

    // Series points fall on pixel centers (col, row) = (0, 0), (1, 1), (3, 2)
    let expected = [(0, 0), (1, 1), (3, 2)];
    for (record, (col, row)) in records[..3].iter().zip(expected) {
        assert_approx_eq!(record.values[2], band_stack_value(2, col, row), 1e-3);
    }
}

#[tokio::test]
async fn test_non_raster_file_fails_batch() {
    let dir = temp_test_dir();
    write_stack(&dir, &["ok_20120105.tif"], &GeoTiffSpec::band_stack(4, 4, 1));
    std::fs::write(dir.path().join("broken_20120106.tif"), b"not a tiff").unwrap();

    let files = list_ext(dir.path(), "tif").unwrap();
    let pool = SamplerPool::new(GeoTiffOpener, SamplerConfig::default()).unwrap();
    let err = pool.sample_files(&files, (0.0, 0.0), None).await.unwrap_err();

    match err {
        SampleError::OpenFailure { path, .. } => {
            assert!(path.ends_with("broken_20120106.tif"));
        }
        other => panic!("expected open failure, got {other}"),
    }
}

#[tokio::test]
async fn test_csv_output_of_sampled_stack() {
    let dir = temp_test_dir();
    let spec = GeoTiffSpec::band_stack(4, 4, 1).without_georeference();
    write_stack(&dir, &["a_201201050842.tif"], &spec);

    let files = list_ext(dir.path(), "tif").unwrap();
    let pool = SamplerPool::new(GeoTiffOpener, SamplerConfig::default()).unwrap();
    let table = pool.sample_files(&files, (1.5, 2.5), None).await.unwrap();

    let mut out = Vec::new();
    table.write_csv(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "timestamp,x,y,band_0\n2012-01-05T08:42:00Z,1.5,2.5,1002\n"
    );
}
