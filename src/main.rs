// This file is a thin command-line front end for the `pixel_delta` library.
// Decoding image files into RGBA8 buffers happens out here, at the adapter
// boundary; the library itself only ever sees raw pixel buffers.

use std::process::ExitCode;

use pixel_delta::{PixelBuffer, comparator};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <image_a> <image_b>", args[0]);
        return ExitCode::FAILURE;
    }

    match run(&args[1], &args[2]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(path_a: &str, path_b: &str) -> Result<(), String> {
    let image_a = image::open(path_a)
        .map_err(|error| format!("failed to open {path_a}: {error}"))?
        .to_rgba8();
    let image_b = image::open(path_b)
        .map_err(|error| format!("failed to open {path_b}: {error}"))?
        .to_rgba8();

    let buffer_a = PixelBuffer::from(&image_a);
    let buffer_b = PixelBuffer::from(&image_b);

    let report = |error| format!("{error}");

    let mae = comparator::mean_absolute_error(&buffer_a, &buffer_b).map_err(report)?;
    let components =
        comparator::mean_absolute_error_by_component(&buffer_a, &buffer_b).map_err(report)?;
    let max = comparator::maximum_absolute_error(&buffer_a, &buffer_b).map_err(report)?;
    let rmse = comparator::root_mean_square_error(&buffer_a, &buffer_b).map_err(report)?;
    let count = comparator::different_pixel_count(&buffer_a, &buffer_b).map_err(report)?;
    let ratio = comparator::different_pixel_ratio(&buffer_a, &buffer_b).map_err(report)?;

    println!(
        "{} x {} pixels",
        buffer_a.width(),
        buffer_a.height()
    );
    println!("mean absolute error:      {mae:.4}");
    println!(
        "per-channel MAE:          r={:.4} g={:.4} b={:.4} a={:.4}",
        components.red, components.green, components.blue, components.alpha
    );
    println!("maximum absolute error:   {max:.4}");
    println!("root mean square error:   {rmse:.4}");
    println!(
        "different pixels:         {count} / {} ({:.2}%)",
        buffer_a.pixel_count(),
        ratio * 100.0
    );

    Ok(())
}
