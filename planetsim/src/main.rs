use planetsim::{Body, Color, DisplayConfig, NVec2, Scenario, ScenarioConfig};
use planetsim::{total_energy, total_momentum, trail_segments};
use planetsim::{bench_gravity, bench_step};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Headless driver: loads a scenario, steps it and logs what a renderer would draw
#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, as a path or a name under `scenarios/`
    #[arg(short, default_value = "solar_system.yaml")]
    file_name: String,

    /// Number of steps to run
    #[arg(long, default_value_t = 8760)]
    steps: u64,

    /// Log a report every this many steps
    #[arg(long, default_value_t = 876)]
    report_every: u64,

    /// Press "faster" this many times before running
    #[arg(long, default_value_t = 0)]
    faster: u32,

    /// Press "slower" this many times before running
    #[arg(long, default_value_t = 0)]
    slower: u32,

    /// Drop a 1e24 kg body at world position X Y (meters) before the first step
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    drop_at: Option<Vec<f64>>,

    /// Give the dropped body a circular orbit around the heaviest body
    #[arg(long)]
    orbital: bool,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn report(scenario: &Scenario, display: &DisplayConfig) {
    let sys = &scenario.system;
    let p = total_momentum(sys);
    info!(
        "t = {:.2} days, step {}, E = {:.6e} J, |p| = {:.3e} kg m/s",
        sys.t / 86_400.0,
        sys.steps,
        total_energy(sys, scenario.parameters()),
        p.norm()
    );

    let center = NVec2::zeros();
    for (i, b) in sys.iter().enumerate() {
        let s = display.world_to_screen(b.x, center);
        let segments = if display.show_trails { trail_segments(b.trail()).count() } else { 0 };
        info!(
            "  #{i}: x = ({:+.4e}, {:+.4e}) m, |v| = {:.4e} m/s, screen = ({:+.1}, {:+.1}), trail segments = {}",
            b.x.x,
            b.x.y,
            b.v.norm(),
            s.x,
            s.y,
            segments
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_gravity()?;
        bench_step()?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).context("invalid scenario")?;
    let display = DisplayConfig::default();

    for _ in 0..args.faster {
        scenario.engine.faster();
    }
    for _ in 0..args.slower {
        scenario.engine.slower();
    }
    info!("simulation speed: {:.6} hours/step", scenario.engine.hours_per_step());

    if let Some(xy) = args.drop_at.as_deref() {
        if let [x, y] = xy {
            let body = Body::at_rest(NVec2::new(*x, *y), 1e24, 10.0, Color::BLUE)?;
            scenario
                .request_insert(body, args.orbital)
                .context("cannot insert body")?;
        }
    }

    let every = args.report_every.max(1);
    for step in 0..args.steps {
        scenario.advance()?;
        if (step + 1) % every == 0 {
            report(&scenario, &display);
        }
    }

    if args.steps % every != 0 {
        report(&scenario, &display);
    }

    Ok(())
}
