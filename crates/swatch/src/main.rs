use clap::{Args, Parser, Subcommand};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use swatch::geometry::{Direction, Point};
use swatch::protocol::{Command, SOCKET_PATH};
use swatch::sequence::{ConcealTiming, Plan, RevealTiming};
use swatch::{ArcSpec, compute_layout};

#[derive(Parser, Debug)]
#[command(name = "swatch", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct ArcArgs {
    /// Number of swatches on the ring
    #[arg(short = 'n', long, default_value_t = 6)]
    count: usize,

    /// Angle of the first swatch in degrees, 0 is straight up
    #[arg(short = 's', long, default_value_t = 0, allow_negative_numbers = true)]
    start: i32,

    /// Total angle the swatches are spread over
    #[arg(long, default_value_t = 180, conflicts_with = "end", allow_negative_numbers = true)]
    span: i32,

    /// Angle of the last swatch, instead of --span
    #[arg(long, allow_negative_numbers = true)]
    end: Option<i32>,

    /// clockwise (cw) or counterclockwise (ccw)
    #[arg(short = 'd', long, default_value = "ccw")]
    direction: Direction,

    /// Distance of the swatches from the center
    #[arg(short = 'r', long, default_value_t = 60.0)]
    radius: f64,
}

impl ArcArgs {
    fn arc(&self) -> ArcSpec {
        match self.end {
            Some(end) => ArcSpec::with_end_angle(self.start, end, self.direction),
            None => ArcSpec::new(self.start, self.span, self.direction),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print where each swatch lands around the center
    Layout(ArcArgs),
    /// Print the reveal and conceal timelines
    Plan {
        #[command(flatten)]
        arc: ArcArgs,

        /// Plan the conceal as if this swatch was picked
        #[arg(short = 'p', long)]
        pick: Option<usize>,
    },
    /// Tap the center swatch of the running picker
    Activate {
        #[arg(requires = "y", allow_negative_numbers = true)]
        x: Option<f64>,
        #[arg(allow_negative_numbers = true)]
        y: Option<f64>,
    },
    /// Pick the swatch at this ring position
    Pick { index: usize },
    /// Close the ring without picking
    Cancel,
    /// Show the picker's state
    Status,
    /// Reset the picker, forgetting its anchor
    Teardown,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout(args) => print_layout(&args),
        Commands::Plan { arc, pick } => print_plan(&arc, pick),
        Commands::Activate { x, y } => {
            let anchor = x.zip(y).map(|(x, y)| Point::new(x, y));
            send_command(Command::Activate(anchor))
        }
        Commands::Pick { index } => send_command(Command::Pick(index)),
        Commands::Cancel => send_command(Command::Cancel),
        Commands::Status => send_command(Command::Status),
        Commands::Teardown => send_command(Command::Teardown),
    }
}

fn print_layout(args: &ArcArgs) -> anyhow::Result<()> {
    let arc = args.arc();
    let config = arc.to_layout_config(args.count, args.radius);
    let layout = compute_layout(&config);

    println!(
        "start {}° span {}° (end {}°) {} radius {}",
        arc.start_angle(),
        config.span,
        arc.start_angle() + config.span,
        arc.direction(),
        config.radius
    );
    for (i, (angle, offset)) in layout
        .angles_degrees()
        .iter()
        .zip(&layout.offsets)
        .enumerate()
    {
        println!(
            "{:>3}  {:>8.2}°  dx {:>8.2}  dy {:>8.2}",
            i, angle, offset.dx, offset.dy
        );
    }
    Ok(())
}

fn print_plan(args: &ArcArgs, pick: Option<usize>) -> anyhow::Result<()> {
    let arc = args.arc();
    let span = arc.effective_span(args.count);

    let reveal = Plan::reveal(&RevealTiming::default(), args.count, span, arc.direction());
    let conceal = Plan::conceal(
        &ConcealTiming::default(),
        args.count,
        span,
        arc.direction(),
        pick,
    );

    for (name, plan) in [("reveal", &reveal), ("conceal", &conceal)] {
        println!(
            "{} ({:.3}s, cross {:.3}s, scrim {:.1} -> {:.1})",
            name, plan.total(), plan.affordance.duration, plan.scrim.from, plan.scrim.to
        );
        for (at, cue) in plan.schedule.cues() {
            println!("  {:>6.3}s  {:?}", at, cue);
        }
    }
    Ok(())
}

fn send_command(command: Command) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to picker daemon at {}: {}. Is picker running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", command)?;

    let mut reply = String::new();
    BufReader::new(&stream).read_line(&mut reply)?;
    let reply = reply.trim();
    if let Some(message) = reply.strip_prefix("error ") {
        anyhow::bail!("{}", message);
    }
    println!("{}", reply);
    Ok(())
}
