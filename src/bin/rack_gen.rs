//! Straight rack profile generator, to mesh with gears from gear_gen. Writes an SVG file.
use anyhow::{Context, Result};
use involute::backend::{draw_rack, FlattenBackend};
use involute::svg::write_svg;
use involute::{build_rack, RackSpec};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "rack_gen", about = "A straight rack profile generator")]
struct Opt {
    /// Length of the pitch line to cover, in mm
    #[structopt(short, long)]
    length: f64,

    /// Rack module, must match the mating gear
    #[structopt(short, long, default_value = "1")]
    module: f64,

    /// Pressure angle, in degrees
    #[structopt(short, long, default_value = "20")]
    pressure_angle: f64,

    /// Output file for the resulting SVG
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,
}

fn help_text(spec: &RackSpec) -> Result<()> {
    let rack = build_rack(spec)?;
    println!(
        "Rack:
        - {} tooth repeats, {:.4}mm long
        - Circular pitch {:.4}mm, tip width {:.4}mm
        - Total depth {:.4}mm",
        rack.repeats(),
        rack.span(),
        spec.circular_pitch(),
        spec.tip_width(),
        2.0 * spec.module
    );
    Ok(())
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    let spec = RackSpec::new(opt.length, opt.module, opt.pressure_angle);
    help_text(&spec)?;

    let rack = draw_rack(&spec, &mut FlattenBackend::default())?;

    let mut file = BufWriter::new(
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&opt.output)
            .with_context(|| format!("opening {}", opt.output.display()))?,
    );
    write_svg(&mut file, &[rack])?;
    file.flush()?;

    Ok(())
}
