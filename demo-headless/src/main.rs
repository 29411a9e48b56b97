use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use volume_calc_core::{
    volume, CubicCentimeters, CubicDecimeters, CubicMeters, FloorMeters, LengthUnit,
    LoadingMeters, LoadingParams, Measurement, VolumeRequest, STANDARD_TRAILER_WIDTH,
};

/// Volume, floor area and loading meters for a box
#[derive(Parser, Debug)]
#[command(name = "volume-calc-demo")]
#[command(about = "Compute cubic volume, floor meters and loading meters", long_about = None)]
struct Args {
    /// All three dimensions as length,width,height (takes precedence over -l/-w/-H)
    #[arg(short, long, value_delimiter = ',', num_args = 1..)]
    dimensions: Option<Vec<f64>>,

    /// Length of one unit
    #[arg(short, long)]
    length: Option<f64>,

    /// Width of one unit
    #[arg(short, long)]
    width: Option<f64>,

    /// Height of one unit
    #[arg(short = 'H', long)]
    height: Option<f64>,

    /// Unit of the dimensions (cm, dm, m)
    #[arg(short, long, default_value = "cm")]
    unit: LengthUnit,

    /// Number of identical units to load
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,

    /// How many units stack on one footprint
    #[arg(short, long, default_value_t = 1.0)]
    stacking_factor: f64,

    /// Usable truck width in meters
    #[arg(short, long, default_value_t = STANDARD_TRAILER_WIDTH)]
    truck_width: f64,

    /// Decimal places in the printed values
    #[arg(long, default_value_t = 2)]
    decimals: usize,

    /// Print a JSON document instead of a table
    #[arg(long)]
    json: bool,
}

impl Args {
    fn request(&self) -> VolumeRequest {
        let mut request = VolumeRequest::new().unit(self.unit);
        if let Some(dimensions) = &self.dimensions {
            request = request.dimensions(dimensions.clone());
        }
        request.named.length = self.length;
        request.named.width = self.width;
        request.named.height = self.height;
        request
    }

    fn loading_params(&self) -> LoadingParams {
        LoadingParams::new(self.quantity, self.stacking_factor, self.truck_width)
    }
}

/// Everything computed for one invocation
#[derive(Serialize)]
struct Report {
    unit: LengthUnit,
    /// `[length, width, height]` in `unit`
    dimensions: [f64; 3],
    cubic_centimeters: CubicCentimeters,
    cubic_decimeters: CubicDecimeters,
    cubic_meters: CubicMeters,
    floor_meters: FloorMeters,
    loading_meters: LoadingMeters,
}

impl Report {
    fn print_table(&self, decimals: usize) {
        println!("=== Volume Calculator ===\n");
        let ldm = &self.loading_meters;
        let [length, width, height] = self.dimensions;
        println!("Box: {length} x {width} x {height} {}\n", self.unit);
        print_row("Volume", &self.cubic_centimeters, decimals);
        print_row("Volume", &self.cubic_decimeters, decimals);
        print_row("Volume", &self.cubic_meters, decimals);
        print_row("Floor", &self.floor_meters, decimals);
        print_row("Loading", ldm, decimals);
        println!(
            "\n({} unit(s), stacking factor {}, truck width {} m)",
            ldm.quantity(),
            ldm.stacking_factor(),
            ldm.truck_width()
        );
    }
}

fn print_row(label: &str, measurement: &impl Measurement, decimals: usize) {
    println!(
        "{label:<8} {:>20} {}",
        measurement.format(decimals),
        measurement.symbol()
    );
}

fn run(args: &Args) -> Result<Report, Box<dyn std::error::Error>> {
    let volume = volume(&args.request())?;
    Ok(Report {
        unit: args.unit,
        dimensions: volume.dimensions().in_unit(args.unit),
        cubic_centimeters: volume.centimeters(),
        cubic_decimeters: volume.decimeters(),
        cubic_meters: volume.meters(),
        floor_meters: volume.floor_meters(),
        loading_meters: volume.loading_meters(args.loading_params())?,
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(report) if args.json => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
        Ok(report) => {
            report.print_table(args.decimals);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
