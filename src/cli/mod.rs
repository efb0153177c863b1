//! Interactive menu and preset runner

pub mod progress;
pub mod prompts;

use std::fs::File;
use std::path::Path;

use inquire::Select;

use crate::config::{AppConfig, Preset};
use crate::engine::{Orchestrator, RunPlan};
use crate::error::{Result, WordForgeError};
use crate::sink::LineWriter;
use crate::types::{GenerationMode, RunSummary};

pub use progress::RunProgress;

/// Main menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Mode(GenerationMode),
    Exit,
}

impl MenuChoice {
    pub fn all() -> Vec<MenuChoice> {
        GenerationMode::ALL
            .iter()
            .copied()
            .map(MenuChoice::Mode)
            .chain(std::iter::once(MenuChoice::Exit))
            .collect()
    }
}

impl std::fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuChoice::Mode(GenerationMode::Smart) => write!(f, "Smart wordlist (personal info → mutations)"),
            MenuChoice::Mode(GenerationMode::Brute) => write!(f, "Brute-force wordlist (charset + length)"),
            MenuChoice::Mode(GenerationMode::Hybrid) => write!(f, "Hybrid (smart + controlled brute)"),
            MenuChoice::Mode(GenerationMode::Random) => write!(f, "Random strong passwords"),
            MenuChoice::Exit => write!(f, "Exit"),
        }
    }
}

/// Menu loop. Esc inside a mode returns here, Ctrl-C leaves the program.
pub fn run_interactive(config: &AppConfig) -> Result<()> {
    loop {
        println!();
        let choice = match Select::new("Choose an option:", MenuChoice::all()).prompt() {
            Ok(choice) => choice,
            Err(e) => match WordForgeError::from(e) {
                WordForgeError::Cancelled { .. } => break,
                other => return Err(other),
            },
        };

        let mode = match choice {
            MenuChoice::Mode(mode) => mode,
            MenuChoice::Exit => break,
        };

        match run_mode(config, mode) {
            Ok(()) => {}
            Err(WordForgeError::Cancelled { interrupted: false }) => continue,
            Err(WordForgeError::Cancelled { interrupted: true }) => break,
            Err(e) if e.is_caller_error() => {
                println!("{}", e.user_message());
            }
            Err(e) => return Err(e),
        }
    }

    println!("👋 Bye");
    Ok(())
}

fn run_mode(config: &AppConfig, mode: GenerationMode) -> Result<()> {
    println!();
    println!("🔧 {} mode", mode);
    println!("───────────────");

    let request = prompts::request_for(mode)?;
    let file_name = prompts::output_file(mode)?;

    let orchestrator = Orchestrator::new(config.engine());
    let plan = orchestrator.plan(&request)?;
    print_plan(&plan);

    if !prompts::confirm("Proceed?")? {
        println!("❌ Aborted.");
        return Ok(());
    }

    let path = config.output_path(&file_name);
    let summary = execute(&orchestrator, config, plan, &path, RunProgress::new())?;
    print_summary(&summary, &path);
    Ok(())
}

/// Run a stored preset without prompting
pub fn run_preset(config: &AppConfig, preset_path: &Path, json: bool) -> Result<RunSummary> {
    let preset = Preset::load(preset_path)?;
    let request = preset.resolve()?;
    let orchestrator = Orchestrator::new(config.engine());

    let plan = orchestrator.plan(&request)?;
    if !json {
        print_plan(&plan);
    }

    let path = config.output_path(&preset.output.to_string_lossy());
    let progress = if json { RunProgress::hidden() } else { RunProgress::new() };
    let summary = execute(&orchestrator, config, plan, &path, progress)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, &path);
    }
    Ok(summary)
}

/// Open the output file and write the planned run into it
pub fn execute(
    orchestrator: &Orchestrator,
    config: &AppConfig,
    plan: RunPlan,
    path: &Path,
    mut progress: RunProgress,
) -> Result<RunSummary> {
    let display = path.display().to_string();
    let file = File::create(path).map_err(|e| WordForgeError::sink_write(e.to_string(), Some(display.clone())))?;
    let mut out = LineWriter::new(file)
        .with_flush_interval(config.flush_interval)
        .with_path(display);

    let result = orchestrator.execute(plan, &mut out, |p| progress.update(p));
    progress.finish();
    result
}

pub fn print_plan(plan: &RunPlan) {
    println!();
    if let Some(total) = &plan.enumeration_total {
        println!("📐 Estimate: {} combinations over {} characters", total, plan.alphabet_size);
    }
    if let Some(mutations) = plan.mutation_total {
        println!("🧬 Keyword variants: {}", mutations);
    }
    println!("📝 Will write: {} lines", plan.lines);
    println!("💾 Approx size: {}", plan.approx_size());
    if let Some(warning) = &plan.warning {
        println!("⚠️  Warning: {}", warning);
    }
    println!();
}

pub fn print_summary(summary: &RunSummary, path: &Path) {
    println!();
    println!("✅ Done. Wrote {} lines to {} (~{})", summary.total_written, path.display(), summary.approx_size);
    if summary.stages.len() > 1 {
        for stage in &summary.stages {
            println!("   • {}: {}", stage.stage, stage.written);
        }
    }
    println!("   ⏱️  Took {:.2}s", summary.elapsed().num_milliseconds() as f64 / 1000.0);
}

pub fn print_banner() {
    println!("🔥 Word Forge - wordlist generator");
    println!("═══════════════════════════════════");
}
