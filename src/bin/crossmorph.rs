use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use crossmorph::{
    Animator, DefaultAnimator, EventLog, Scene, SceneDoc, SceneHost, ScheduleLog,
    TransitionEvent, TransitionSession, TransitionState,
};

#[derive(Parser, Debug)]
#[command(name = "crossmorph", version)]
struct Cli {
    /// Log engine decisions to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print resolved target states and the scheduled interpolations as JSON.
    Plan(PlanArgs),
    /// Drive a transition frame by frame and print a progress trace.
    Simulate(SimulateArgs),
    /// Parse modifier text and print the typed modifiers as JSON.
    Parse(ParseArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frames per second of the simulated display.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Take over at this progress and cancel back to the start.
    #[arg(long)]
    cancel_at: Option<f64>,

    /// Scrub interactively to this progress, then finish.
    #[arg(long)]
    scrub: Option<f64>,
}

#[derive(Parser, Debug)]
struct ParseArgs {
    /// Modifier text, e.g. "fade scale(0.8) duration(0.3)".
    text: String,
}

// Upper bound on simulated frames; a transition never legitimately runs this long.
const MAX_FRAMES: u32 = 100_000;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Parse(args) => cmd_parse(args),
    }
}

fn read_scene_json(path: &Path) -> anyhow::Result<SceneDoc> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc: SceneDoc = serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(doc)
}

fn load(path: &Path) -> anyhow::Result<(SceneDoc, Scene)> {
    let doc = read_scene_json(path)?;
    let scene = doc
        .build()
        .with_context(|| format!("build scene '{}'", path.display()))?;
    Ok((doc, scene))
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let (doc, scene) = load(&args.in_path)?;
    let log = ScheduleLog::new();
    let animators: Vec<Box<dyn Animator>> =
        vec![Box::new(DefaultAnimator::new().with_observer(log.clone()))];
    let mut session =
        TransitionSession::new(scene.graph, scene.container, doc.opts)?.with_animators(animators);

    if !session.start_transition(scene.source, scene.destination) {
        anyhow::bail!("session refused to start");
    }
    let mut states = Vec::new();
    if let Some(ctx) = session.context() {
        for (node, state) in ctx.states() {
            states.push(serde_json::json!({
                "node": node,
                "id": session.host().identifier(node),
                "appearing": ctx.is_appearing(node),
                "state": state,
            }));
        }
    }
    session.tick(0.0);
    let total = session.total_duration();
    session.finish(false);

    let plan = serde_json::json!({
        "total_duration": total,
        "states": states,
        "schedule": log.entries(),
    });
    println!("{}", serde_json::to_string_pretty(&plan)?);
    tracing::info!(total, scheduled = log.len(), "planned transition");
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.fps > 0.0) {
        anyhow::bail!("--fps must be > 0");
    }
    let (doc, scene) = load(&args.in_path)?;
    let events = EventLog::new();
    let mut session = TransitionSession::new(scene.graph, scene.container, doc.opts)?;
    session.add_observer(events.clone());

    if !session.start_transition(scene.source, scene.destination) {
        anyhow::bail!("session refused to start");
    }
    session.tick(0.0);
    if let Some(p) = args.scrub {
        session.update(p);
        print_frame(0, &session);
        session.finish(true);
    }

    let dt = 1.0 / args.fps;
    let mut cancel_at = args.cancel_at;
    let mut frame = 0;
    while session.state() != TransitionState::Idle {
        if frame >= MAX_FRAMES {
            anyhow::bail!("transition did not complete within {MAX_FRAMES} frames");
        }
        frame += 1;
        session.tick(dt);
        if session.state() == TransitionState::Idle {
            break;
        }
        print_frame(frame, &session);
        if let Some(p) = cancel_at
            && session.progress() >= p
        {
            session.update(p);
            session.cancel(true);
            cancel_at = None;
        }
    }

    let finished = events
        .events()
        .iter()
        .any(|e| matches!(e, TransitionEvent::DidEnd { .. }));
    println!(
        "{}",
        serde_json::json!({ "frames": frame, "finished": finished, "clock": session.clock() })
    );
    tracing::info!(frames = frame, finished, "simulation done");
    Ok(())
}

fn print_frame<H: SceneHost>(frame: u32, session: &TransitionSession<H>) {
    println!(
        "{}",
        serde_json::json!({
            "frame": frame,
            "clock": session.clock(),
            "state": session.state(),
            "progress": session.progress(),
        })
    );
}

fn cmd_parse(args: ParseArgs) -> anyhow::Result<()> {
    let modifiers = crossmorph::parse_modifiers(&args.text)
        .with_context(|| format!("parse modifiers '{}'", args.text))?;
    println!("{}", serde_json::to_string_pretty(&modifiers)?);
    Ok(())
}
