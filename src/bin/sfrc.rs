//! FRC resolution estimation
//!
//! Computes the FRC of 2 images, or of a single image diagonally split, from
//! numpy `.npy` files.

use anyhow::{bail, Context};
use ndarray::{Array2, ShapeBuilder};
use npyz::{DType, NpyFile, Order};
use sfrc::{preprocess::crop_square, DegeneratePolicy, FourierRingCorrelation, FrcCurve, Shape};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "sfrc", about = "Fourier Ring Correlation of 2D images")]
struct Opt {
    /// Image (.npy), diagonally split when it is the only one
    #[structopt(parse(from_os_str))]
    image: PathBuf,
    /// Second image (.npy)
    #[structopt(parse(from_os_str))]
    other: Option<PathBuf>,
    /// Threshold: half-bit, one-bit, em, a number or anything else for the 4 curves bundle
    #[structopt(short, long, default_value = "half-bit")]
    threshold: String,
    /// Rings up to the corner of the spectrum
    #[structopt(long)]
    extended: bool,
    /// Ring sample count from the number of pixels in each ring
    #[structopt(long)]
    pixel_count: bool,
    /// Thresholds without the information split of diagonally split images
    #[structopt(long)]
    no_info_split: bool,
    /// Hanning apodization of the images
    #[structopt(long)]
    hanning: bool,
    /// Size of the centered square crop of the images
    #[structopt(long)]
    crop: Option<usize>,
    /// Set the FRC of rings without power to 0 instead of failing
    #[structopt(long)]
    zero_degenerate: bool,
    /// CSV output file
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// FRC plot (.png)
    #[cfg(feature = "plot")]
    #[structopt(short, long, parse(from_os_str))]
    plot: Option<PathBuf>,
    /// Rings diagnostic plot (.png)
    #[cfg(feature = "plot")]
    #[structopt(long, parse(from_os_str))]
    rings_plot: Option<PathBuf>,
}

/// Loads a 2D array from a `.npy` file
fn load_npy(path: &Path) -> anyhow::Result<Array2<f64>> {
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    let npy = NpyFile::new(BufReader::new(file))?;
    let dims: Vec<usize> = npy.shape().iter().map(|&n| n as usize).collect();
    let (rows, cols) = match Shape::from_dims(&dims)? {
        Shape::D2 { rows, cols } => (rows, cols),
        shape => bail!("{:?}: expected a 2D image, found a {} array", path, shape),
    };
    let fortran = matches!(npy.order(), Order::Fortran);
    let single_precision =
        matches!(npy.dtype(), DType::Plain(ref ts) if ts.to_string().ends_with("f4"));
    let data: Vec<f64> = if single_precision {
        npy.into_vec::<f32>()?.into_iter().map(f64::from).collect()
    } else {
        npy.into_vec::<f64>()
            .with_context(|| format!("{:?}: expected a f32 or f64 array", path))?
    };
    let img = if fortran {
        Array2::from_shape_vec((rows, cols).f(), data)?
    } else {
        Array2::from_shape_vec((rows, cols), data)?
    };
    log::info!("{:?}: {}x{} image", path, rows, cols);
    Ok(img)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let crop = |img: Array2<f64>| -> anyhow::Result<Array2<f64>> {
        Ok(match opt.crop {
            Some(side) => crop_square(&img, side, None)?,
            None => img,
        })
    };

    let frc = FourierRingCorrelation::default()
        .threshold(opt.threshold.as_str())
        .inscribed_rings(!opt.extended)
        .analytical_arc_based(!opt.pixel_count)
        .info_split(!opt.no_info_split)
        .hanning(opt.hanning)
        .degenerate_policy(if opt.zero_degenerate {
            DegeneratePolicy::Zero
        } else {
            DegeneratePolicy::Error
        });

    let image = crop(load_npy(&opt.image)?)?;
    let curve: FrcCurve = match &opt.other {
        Some(other) => {
            let other = crop(load_npy(other)?)?;
            frc.compute(&image, &other)?
        }
        None => frc.single_image(&image)?,
    };
    print!("{}", curve);

    if let Some(path) = &opt.output {
        curve
            .to_csv(path)
            .with_context(|| format!("failed to write {:?}", path))?;
    }
    #[cfg(feature = "plot")]
    {
        if let Some(path) = &opt.plot {
            sfrc::plot::plot_frc(&curve, path)?;
        }
        if let Some(path) = &opt.rings_plot {
            // the single image FRC works on the half-sampled images
            let side = match opt.other {
                Some(_) => image.nrows(),
                None => image.nrows() / 2,
            };
            sfrc::RingIndexSet::with_sink(
                &[side, side],
                !opt.extended,
                &sfrc::plot::PngRingsSink::new(path),
            )?;
        }
    }

    Ok(())
}
