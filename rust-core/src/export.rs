//! CSV export of a spectrogram matrix
//!
//! One row per frequency bin. The first column is the bin frequency in Hz,
//! the header names it `frequency_hz` and labels every further column with
//! its frame start time in seconds.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;
use ndarray::Array2;

use crate::error::{Result, SonogramError};
use crate::spectrum::SpectrogramMatrix;

fn export_error(err: impl ToString) -> SonogramError {
    SonogramError::Export(err.to_string())
}

/// Write `matrix` as CSV into `out`
///
/// With `db_floor` set, cells go through [`SpectrogramMatrix::to_db`]
/// first; otherwise the linear values are written.
pub fn write_csv<W: Write>(out: W, matrix: &SpectrogramMatrix, db_floor: Option<f64>) -> Result<()> {
    let db_values: Option<Array2<f64>> = db_floor.map(|floor| matrix.to_db(floor));
    let values = db_values.as_ref().unwrap_or(matrix.values());

    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["frequency_hz".to_string()];
    header.extend(matrix.frame_start_times().iter().map(|t| format!("{:.6}", t)));
    writer.write_record(&header).map_err(export_error)?;

    for (freq, row) in matrix.frequencies().iter().zip(values.rows()) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(format!("{:.4}", freq));
        record.extend(row.iter().map(|v| format!("{:.6e}", v)));
        writer.write_record(&record).map_err(export_error)?;
    }

    writer.flush().map_err(export_error)?;
    Ok(())
}

/// Write `matrix` as CSV to a new file at `path`
pub fn write_csv_file(path: &Path, matrix: &SpectrogramMatrix, db_floor: Option<f64>) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| export_error(format!("cannot create {}: {}", path.display(), e)))?;
    write_csv(file, matrix, db_floor)?;

    info!(
        "Exported {} bins x {} frames to {}",
        matrix.num_bins(),
        matrix.num_frames(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::WaveformBuffer;
    use crate::spectrum::{compute_spectrogram, AnalysisParameters};

    fn small_matrix() -> SpectrogramMatrix {
        // 64 samples @ 1 kHz, L = 16, hop = 8 -> 7 frames x 9 bins
        let samples: Vec<f64> = (0..64).map(|n| if n % 4 == 0 { 1.0 } else { 0.0 }).collect();
        let buffer = WaveformBuffer::new(samples, 1000).unwrap();
        let params = AnalysisParameters::from_ui("hann", 16, 50).unwrap();
        compute_spectrogram(&buffer, &params).unwrap()
    }

    fn read_back(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let header = reader.headers().unwrap().iter().map(String::from).collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        (header, rows)
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sonogram-export-{}-{}.csv", std::process::id(), name))
    }

    #[test]
    fn test_layout_is_one_row_per_bin() {
        let matrix = small_matrix();
        assert_eq!((matrix.num_bins(), matrix.num_frames()), (9, 7));

        let path = temp_path("layout");
        write_csv_file(&path, &matrix, None).unwrap();
        let (header, rows) = read_back(&path);
        std::fs::remove_file(&path).ok();

        assert_eq!(header.len(), 1 + matrix.num_frames());
        assert_eq!(header[0], "frequency_hz");
        assert_eq!(header[1], "0.000000");
        assert_eq!(header[2], "0.008000");

        assert_eq!(rows.len(), matrix.num_bins());
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 1 + matrix.num_frames());
            let freq: f64 = row[0].parse().unwrap();
            assert!((freq - i as f64 * 62.5).abs() < 1e-9);
        }

        let cell: f64 = rows[4][3].parse().unwrap();
        let expected = matrix.get(4, 2).unwrap();
        assert!((cell - expected).abs() <= 1e-5 * expected.abs().max(1e-12));
    }

    #[test]
    fn test_db_export_applies_floor() {
        let matrix = small_matrix();
        let path = temp_path("db");
        write_csv_file(&path, &matrix, Some(1e-10)).unwrap();
        let (_, rows) = read_back(&path);
        std::fs::remove_file(&path).ok();

        let db = matrix.to_db(1e-10);
        for (i, row) in rows.iter().enumerate() {
            for (j, text) in row[1..].iter().enumerate() {
                let cell: f64 = text.parse().unwrap();
                assert!(cell >= -200.0 - 1e-6);
                assert!((cell - db[[i, j]]).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_write_into_memory() {
        let matrix = small_matrix();
        let mut out = Vec::new();
        write_csv(&mut out, &matrix, None).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("frequency_hz,"));
        assert_eq!(text.lines().count(), 1 + matrix.num_bins());
    }

    #[test]
    fn test_unwritable_path_is_export_error() {
        let matrix = small_matrix();
        let path = std::env::temp_dir()
            .join("sonogram-no-such-dir")
            .join("out.csv");

        let err = write_csv_file(&path, &matrix, None).unwrap_err();
        assert!(matches!(err, SonogramError::Export(_)));
    }
}
