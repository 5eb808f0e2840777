//! Command-line front end: analyse a WAV file and print or export the result

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::Parser;

use sonogram::audio::{reduce_to_first_channel, SampleSource, WavSource};
use sonogram::export::write_csv_file;
use sonogram::spectrum::params::{
    DEFAULT_OVERLAP_PERCENT, DEFAULT_SEGMENT_LENGTH, WINDOW_CHOICES,
};
use sonogram::spectrum::SpectrumScale;
use sonogram::{Analysis, AnalysisParameters, SpectrogramEngine};

#[derive(Parser)]
#[command(name = "sonogram", about = "Waveform and spectrogram analysis of a WAV file")]
struct Cli {
    /// Input WAV file (first channel is analysed)
    input: PathBuf,

    /// Window applied to every segment
    #[arg(short, long, default_value = "hamming",
          value_parser = PossibleValuesParser::new(WINDOW_CHOICES))]
    window: String,

    /// Samples per segment (NFFT)
    #[arg(short = 'n', long, default_value_t = DEFAULT_SEGMENT_LENGTH)]
    segment_length: usize,

    /// Overlap between segments in percent
    #[arg(short, long, default_value_t = DEFAULT_OVERLAP_PERCENT)]
    overlap: u32,

    /// Value stored per cell
    #[arg(short, long, default_value = "magnitude",
          value_parser = ["magnitude", "power", "density"])]
    scale: String,

    /// Export values in dB instead of linear units
    #[arg(long)]
    db: bool,

    /// Floor applied before the dB conversion
    #[arg(long, default_value_t = 1e-10)]
    floor: f64,

    /// Write the spectrogram as CSV (one row per frequency bin)
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let params = AnalysisParameters::from_ui(&cli.window, cli.segment_length, cli.overlap)?
        .with_scale(SpectrumScale::from_name(&cli.scale)?);

    let audio = WavSource::new()
        .read(&cli.input)
        .with_context(|| format!("Could not analyse {}", cli.input.display()))?;
    let channels = audio.channels;
    let waveform = reduce_to_first_channel(&audio)?;

    let mut engine = SpectrogramEngine::new();
    let analysis = Analysis::of_waveform(&mut engine, waveform, &params)?;
    let matrix = &analysis.spectrogram;

    println!("File:            {}", cli.input.display());
    println!("Sample rate:     {} Hz", analysis.waveform.sample_rate());
    println!("Channels:        {} (analysed: 1)", channels);
    println!("Samples:         {}", analysis.waveform.len());
    println!("Duration:        {:.3} s", analysis.waveform.duration());
    println!("Peak amplitude:  {}", analysis.waveform.peak_amplitude());
    println!("Window:          {}", params.window());
    println!("Segment length:  {}", params.segment_length());
    println!("Hop:             {}", params.hop());
    println!("Frames x bins:   {} x {}", matrix.num_frames(), matrix.num_bins());

    if let Some(frame) = (0..matrix.num_frames()).max_by(|&a, &b| {
        let peak = |j| matrix.peak_bin(j).and_then(|k| matrix.get(k, j)).unwrap_or(0.0);
        peak(a).total_cmp(&peak(b))
    }) {
        if let Some(bin) = matrix.peak_bin(frame) {
            println!(
                "Strongest bin:   {:.1} Hz at {:.3} s",
                matrix.frequencies()[bin],
                matrix.frame_start_times()[frame]
            );
        }
    }

    if let Some(path) = &cli.csv {
        write_csv_file(path, matrix, cli.db.then_some(cli.floor))?;
    }

    Ok(())
}
