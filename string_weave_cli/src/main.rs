use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use num_traits::AsPrimitive;
use string_weave::{
    comparison::{Comparison, ErrorHistory},
    motion::commands_to_string,
    preprocess,
    verboser::Silent,
    Canvas, ChordTable, Config, Float, GreedyPlanner, Grid, MotionPlanner, PegLayout, StepResult,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image path.
    #[arg()]
    input: PathBuf,

    /// JSON file with planning parameters. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of pegs around the board.
    #[arg(short, long)]
    pegs: Option<usize>,

    /// Physical board radius, in the unit string usage is reported in.
    #[arg(long)]
    radius: Option<f64>,

    /// Radius the winder head travels around, when it differs from `--radius`.
    #[arg(long)]
    board_radius: Option<f64>,

    /// Line width in pixels of the comparison rendering.
    #[arg(long)]
    thickness: Option<u32>,

    #[arg(long)]
    max_lines: Option<usize>,

    /// String budget; planning stops once this much string is used.
    #[arg(long)]
    max_cost: Option<f64>,

    /// Maximum number of strings between the same two pegs.
    #[arg(long)]
    max_overlap: Option<u32>,

    /// Size in pixels of the side of the processed image.
    #[arg(short, long)]
    resolution: Option<u32>,

    /// Precision of calculations.
    #[arg(long, value_enum, default_value_t = Precision::Double)]
    precision: Precision,

    /// Write an SVG preview of the plan.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Write the peg sequence, one index per line.
    #[arg(long)]
    instructions: Option<PathBuf>,

    /// Write the winder commands, one per line.
    #[arg(long)]
    commands: Option<PathBuf>,

    /// Write the comparison rendering as an image.
    #[arg(long)]
    render: Option<PathBuf>,

    /// Write the error curve as JSON.
    #[arg(long)]
    errors: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Precision {
    #[value(alias = "f32")]
    Single,
    #[value(alias = "f64")]
    Double,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Config::default(),
        };
        if let Some(pegs) = self.pegs {
            config.peg_count = pegs;
        }
        if let Some(radius) = self.radius {
            config.real_radius = radius;
        }
        if let Some(thickness) = self.thickness {
            config.string_thickness = thickness;
        }
        if let Some(max_lines) = self.max_lines {
            config.max_lines = Some(max_lines);
        }
        if let Some(max_cost) = self.max_cost {
            config.max_cost = Some(max_cost);
        }
        if let Some(max_overlap) = self.max_overlap {
            config.max_overlap = max_overlap;
        }
        config.validate()?;
        Ok(config)
    }

    fn motion_planner<'a, S: Float>(
        &self,
        layout: &'a PegLayout<S>,
        config: &Config,
    ) -> anyhow::Result<MotionPlanner<'a, S>>
    where
        f64: AsPrimitive<S>,
        usize: AsPrimitive<S>,
    {
        let board_radius = self.board_radius.unwrap_or(config.real_radius);
        Ok(MotionPlanner::new(layout, board_radius.as_())?)
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(env_filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let config = args.load_config()?;
    match args.precision {
        Precision::Single => run::<f32>(&args, &config),
        Precision::Double => run::<f64>(&args, &config),
    }
}

fn run<S: Float + AsPrimitive<isize>>(args: &Args, config: &Config) -> anyhow::Result<()>
where
    f64: AsPrimitive<S>,
    isize: AsPrimitive<S>,
    usize: AsPrimitive<S>,
    u8: AsPrimitive<S>,
{
    let image = image::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let prepared = preprocess::prepare(&image, args.resolution);
    let grid = Grid::new(
        prepared.ink.height() as usize,
        prepared.ink.width() as usize,
    );
    info!(
        width = grid.width,
        height = grid.height,
        pegs = config.peg_count,
        "image prepared"
    );

    let layout = PegLayout::<S>::for_grid(config.peg_count, grid)?;
    let table = ChordTable::from_config(&layout, config, &mut Silent)?;
    let mut planner = GreedyPlanner::new(&table, Canvas::from_luma(&prepared.ink), config)?;
    let mut comparison = Comparison::new(prepared.original, config.string_thickness)?;
    let mut history = ErrorHistory::default();

    // drive the planner one line at a time, the way a live winder would
    let termination = loop {
        if let Some(termination) = planner.check_budget() {
            break termination;
        }
        match planner.step() {
            StepResult::Drawn(line) => {
                comparison.draw_line(
                    layout.peg(line.from)?.position,
                    layout.peg(line.to)?.position,
                );
                let total_cost = line.total_cost.to_f64().unwrap_or(f64::NAN);
                if let Some(error) = history.record(total_cost, &comparison) {
                    info!(lines = planner.lines(), total_cost, error, "mean squared error");
                }
            }
            StepResult::Terminated(termination) => break termination,
        }
    };
    let plan = planner.into_plan();
    info!(
        ?termination,
        lines = plan.lines(),
        total_cost = %plan.total_cost(),
        "string art planned"
    );

    let mut motion = args.motion_planner(&layout, config)?;
    let commands = motion.plan_sequence(plan.sequence())?;
    info!(commands = commands.len(), "motion planned");

    if let Some(path) = &args.svg {
        let document = plan.build_svg(&layout, grid, config.string_thickness as f32)?;
        svg::save(path, &document).with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.instructions {
        fs::write(path, plan.build_instructions())
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.commands {
        fs::write(path, commands_to_string(&commands))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.render {
        comparison
            .rendering()
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.errors {
        let json = serde_json::to_string_pretty(history.samples())?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "string_weave",
            "in.png",
            "--pegs",
            "48",
            "--max-overlap",
            "2",
            "--max-cost",
            "3000",
        ]);
        let config = args.load_config().expect("valid config");
        assert_eq!(config.peg_count, 48);
        assert_eq!(config.max_overlap, 2);
        assert_eq!(config.max_cost, Some(3000.0));
        assert_eq!(config.max_lines, Config::default().max_lines);
        assert!(matches!(args.precision, Precision::Double));
    }

    #[test]
    fn invalid_flags_fail_before_planning() {
        let args = Args::parse_from(["string_weave", "in.png", "--pegs", "1"]);
        assert!(args.load_config().is_err());
    }

    #[test]
    fn board_radius_drives_motion_independently_of_string_cost() {
        let layout = PegLayout::<f64>::for_grid(36, Grid::square(200)).expect("valid layout");

        let args = Args::parse_from(["string_weave", "in.png", "--board-radius", "2"]);
        let config = args.load_config().expect("valid config");
        let mut motion = args.motion_planner(&layout, &config).expect("valid radius");
        assert_eq!(motion.board_radius(), 2.0);
        let commands = motion.transition(9, None).expect("valid peg");
        assert_eq!(commands[0].radial_delta, 1.8);

        let args = Args::parse_from(["string_weave", "in.png", "--radius", "0.5"]);
        let config = args.load_config().expect("valid config");
        let motion = args.motion_planner(&layout, &config).expect("valid radius");
        assert_eq!(motion.board_radius(), 0.5);

        let args = Args::parse_from(["string_weave", "in.png", "--board-radius", "0"]);
        let config = args.load_config().expect("valid config");
        assert!(args.motion_planner(&layout, &config).is_err());
    }

    #[test]
    fn precision_accepts_type_names() {
        let args = Args::parse_from(["string_weave", "in.png", "--precision", "f32"]);
        assert!(matches!(args.precision, Precision::Single));
    }
}
