//! Involute gear profile generator. Draws spur, bevel and helical gear outlines, viewed down the
//! gear axis, to an SVG file.
use anyhow::{Context, Result};
use involute::backend::{
    draw_bevel_gear, draw_gear, draw_helical_gear, FlattenBackend, Polyline,
};
use involute::svg::write_svg;
use involute::{cone_apex, helix, GearSpec, HelixSpec};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "gear_gen", about = "An involute gear profile generator")]
struct Opt {
    /// Number of gear teeth
    #[structopt(short, long, default_value = "30")]
    teeth: u32,

    /// Gear module
    #[structopt(short, long, default_value = "1")]
    module: f64,

    /// Pressure angle, in degrees
    #[structopt(short, long, default_value = "20")]
    pressure_angle: f64,

    /// Cone angle for a bevel gear, in degrees. 0 for a flat gear
    #[structopt(long, default_value = "0")]
    cone_angle: f64,

    /// Helix angle for a helical gear, in degrees. Negative for a left hand helix
    #[structopt(long)]
    helix_angle: Option<f64>,

    /// Thickness of a helical gear, in mm
    #[structopt(long, default_value = "10")]
    thickness: f64,

    /// Extra dedendum depth, as a fraction of the module
    #[structopt(long, default_value = "0.167")]
    clearance: f64,

    /// Number of steps along each involute flank
    #[structopt(long, default_value = "5")]
    samples: usize,

    /// Also draw the pitch circle
    #[structopt(long)]
    pitch_circle: bool,

    /// Output file for the resulting SVG
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,
}

impl Opt {
    fn gear_spec(&self) -> GearSpec {
        GearSpec {
            teeth: self.teeth,
            module: self.module,
            pressure_angle: self.pressure_angle,
            cone_angle: self.cone_angle,
            clearance: self.clearance,
            involute_samples: self.samples,
            pitch_circle: self.pitch_circle,
        }
    }
}

fn help_text(spec: &GearSpec) {
    let dims = spec.dimensions();
    println!(
        "Gear blank:
        - Outside diameter {:.4}mm
        - Pitch diameter {:.4}mm
        - Root diameter {:.4}mm",
        dims.outside_diameter, dims.pitch_diameter, dims.root_diameter
    )
}

fn draw(opt: &Opt, spec: &GearSpec) -> Result<Vec<Polyline>> {
    let mut backend = FlattenBackend::default();

    if spec.is_bevel() {
        let apex = cone_apex(spec)?;
        println!("Pitch cone apex {:.4}mm above the gear", apex.z);
        let surfaces = draw_bevel_gear(spec, &mut backend)?;
        let mut polylines = vec![surfaces.gear.profile().clone()];
        polylines.extend(surfaces.pitch.iter().map(|s| s.profile().clone()));
        return Ok(polylines);
    }

    if let Some(helix_angle) = opt.helix_angle {
        let helix_spec = HelixSpec {
            helix_angle,
            thickness: opt.thickness,
        };
        let rail = helix(spec, &helix_spec)?;
        match rail.pitch {
            Some(pitch) => println!("Helix pitch {pitch:.4}mm, {:.4} turns", rail.turns),
            None => println!("Zero helix angle, straight extrusion"),
        }
        let surfaces = draw_helical_gear(spec, &helix_spec, &mut backend)?;
        let mut polylines = vec![surfaces.gear.profile().clone()];
        polylines.extend(surfaces.pitch.iter().map(|s| s.profile().clone()));
        return Ok(polylines);
    }

    let curves = draw_gear(spec, &mut backend)?;
    let mut polylines = vec![curves.gear];
    polylines.extend(curves.pitch_circle);
    Ok(polylines)
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    let spec = opt.gear_spec();
    spec.validate()?;
    help_text(&spec);

    let polylines = draw(&opt, &spec)?;

    let mut file = BufWriter::new(
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&opt.output)
            .with_context(|| format!("opening {}", opt.output.display()))?,
    );
    write_svg(&mut file, &polylines)?;
    file.flush()?;

    Ok(())
}
