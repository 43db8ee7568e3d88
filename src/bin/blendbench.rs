use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use blendbench::bench::{BenchConfig, BenchReport, run_bench, run_once};
use blendbench::synth::{REFERENCE_DIMS, reference_pair};
use blendbench::verify::verify_strategies;
use blendbench::{Dimensions, ParallelBlender, ParallelOpts, PixelBuffer, Strategy};

#[derive(Parser, Debug)]
#[command(name = "blendbench", version)]
struct Cli {
    /// Log kernel spans and per-strategy events to stderr (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Time one blend per strategy and print pixel 0.
    Run(RunArgs),
    /// Time repeated blends and report p50/p90/p99 per strategy.
    Bench(BenchArgs),
    /// Check every strategy against the scalar kernel on random buffers.
    Verify(VerifyArgs),
    /// Blend one PNG over another and write the result.
    Composite(CompositeArgs),
}

#[derive(Args, Debug)]
struct FixtureArgs {
    #[arg(long, default_value_t = REFERENCE_DIMS.width)]
    width: u32,

    #[arg(long, default_value_t = REFERENCE_DIMS.height)]
    height: u32,

    /// Strategy to time (scalar, batched, batched4, batched8, batched16); repeat to time
    /// several. Defaults to all.
    #[arg(long = "strategy")]
    strategies: Vec<Strategy>,

    #[command(flatten)]
    parallel: ParallelArgs,
}

#[derive(Args, Debug)]
struct ParallelArgs {
    /// Split the buffer into row bands blended on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel (default: rayon's choice).
    #[arg(long)]
    threads: Option<usize>,

    /// Rows per band for --parallel.
    #[arg(long, default_value_t = ParallelOpts::default().rows_per_band)]
    rows_per_band: usize,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    fixture: FixtureArgs,
}

#[derive(Args, Debug)]
struct BenchArgs {
    #[command(flatten)]
    fixture: FixtureArgs,

    #[arg(long, default_value_t = 1)]
    warmup: u32,

    #[arg(long, default_value_t = 100)]
    repeats: u32,

    /// Print the report as JSON on stdout.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 64)]
    cases: usize,

    #[command(flatten)]
    parallel: ParallelArgs,

    /// Print the report as JSON on stdout.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CompositeArgs {
    /// Destination image; treated as opaque.
    #[arg(long)]
    dst: PathBuf,

    /// Source image, blended by its alpha.
    #[arg(long)]
    src: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// scalar, batched, batched4, batched8 or batched16.
    #[arg(long, default_value_t = Strategy::default())]
    strategy: Strategy,

    #[command(flatten)]
    parallel: ParallelArgs,
}

impl FixtureArgs {
    fn dims(&self) -> anyhow::Result<Dimensions> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!("--width/--height must be > 0");
        }
        Ok(Dimensions::new(self.width, self.height))
    }

    fn strategies(&self) -> Vec<Strategy> {
        if self.strategies.is_empty() {
            Strategy::ALL.to_vec()
        } else {
            self.strategies.clone()
        }
    }
}

impl ParallelArgs {
    fn opts(&self) -> Option<ParallelOpts> {
        self.parallel.then_some(ParallelOpts {
            threads: self.threads,
            rows_per_band: self.rows_per_band,
        })
    }

    fn blender(&self) -> anyhow::Result<Option<ParallelBlender>> {
        let blender = self
            .opts()
            .map(ParallelBlender::new)
            .transpose()
            .context("build parallel blender")?;
        Ok(blender)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let res = match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Bench(args) => cmd_bench(args),
        Command::Verify(args) => cmd_verify(args),
        Command::Composite(args) => cmd_composite(args),
    };
    if let Err(err) = res {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let dims = args.fixture.dims()?;
    let (dst, src) = reference_pair(dims)?;
    let blender = args.fixture.parallel.blender()?;

    for strategy in args.fixture.strategies() {
        let sample = run_once(strategy, blender.as_ref(), &dst, &src)
            .with_context(|| format!("blend with {strategy}"))?;
        println!(
            "{strategy:<12}\t{elapsed:?} / {px:?}",
            elapsed = sample.elapsed,
            px = sample.first_pixel
        );
    }
    Ok(())
}

fn cmd_bench(args: BenchArgs) -> anyhow::Result<()> {
    let cfg = BenchConfig {
        dims: args.fixture.dims()?,
        warmup: args.warmup,
        repeats: args.repeats,
        strategies: args.fixture.strategies(),
        parallel: args.fixture.parallel.opts(),
    };

    eprintln!(
        "bench: {repeats} run(s) ({profile} build), {dims}, warmup={warmup}, mode={mode}",
        repeats = cfg.repeats,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        dims = cfg.dims,
        warmup = cfg.warmup,
        mode = if cfg.parallel.is_some() {
            "parallel"
        } else {
            "sequential"
        },
    );

    let report = run_bench(&cfg)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_percentiles(&report);
    }
    Ok(())
}

fn print_percentiles(report: &BenchReport) {
    fn fmt_ms(ns: u64) -> String {
        format!("{:.3}ms", ns as f64 / 1_000_000.0)
    }

    if let Some(threads) = report.threads {
        println!("threads: {threads}");
    }
    println!("percentiles across runs (p50/p90/p99):");
    for r in &report.results {
        let p = r.percentiles;
        println!(
            "  {name:10} p50={p50:>10}  p90={p90:>10}  p99={p99:>10}  first={px:?}",
            name = r.strategy,
            p50 = fmt_ms(p.p50_ns),
            p90 = fmt_ms(p.p90_ns),
            p99 = fmt_ms(p.p99_ns),
            px = r.first_pixel,
        );
    }
}

fn cmd_verify(args: VerifyArgs) -> anyhow::Result<()> {
    let blender = args.parallel.blender()?;
    let report = verify_strategies(args.seed, args.cases, blender.as_ref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "verified {cases} case(s), {pixels} pixel(s): {mismatches} mismatch(es), {alpha} alpha mutation(s), max deviation from /255 = {dev}",
            cases = report.cases,
            pixels = report.pixels,
            mismatches = report.mismatches.len(),
            alpha = report.alpha_mutations,
            dev = report.max_div255_deviation,
        );
        for m in &report.mismatches {
            println!(
                "  case {case} ({dims}) {strategy}: pixel {pixel} expected {expected:?} got {actual:?}",
                case = m.case,
                dims = m.dims,
                strategy = m.strategy,
                pixel = m.pixel,
                expected = m.expected,
                actual = m.actual,
            );
        }
    }

    if !report.is_ok() {
        anyhow::bail!("strategies disagree (seed {})", args.seed);
    }
    Ok(())
}

fn cmd_composite(args: CompositeArgs) -> anyhow::Result<()> {
    let mut dst = PixelBuffer::open(&args.dst)
        .with_context(|| format!("load destination '{}'", args.dst.display()))?;
    let src = PixelBuffer::open(&args.src)
        .with_context(|| format!("load source '{}'", args.src.display()))?;
    if dst.dimensions() != src.dimensions() {
        anyhow::bail!(
            "image sizes differ: destination {} vs source {}",
            dst.dimensions(),
            src.dimensions()
        );
    }

    let strategy = args.strategy;
    match args.parallel.blender()? {
        Some(blender) => {
            let dims = dst.dimensions();
            blender.blend_in_place(dst.as_bytes_mut(), src.as_bytes(), dims, strategy)?
        }
        None => dst.blend_from(&src, strategy)?,
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    dst.save_png(&args.out)
        .with_context(|| format!("write '{}'", args.out.display()))?;
    eprintln!("wrote {} ({}, {strategy})", args.out.display(), dst.dimensions());
    Ok(())
}
