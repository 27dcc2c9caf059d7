//! Colorful console output for planning sessions.
//!
//! Provides a `tracing` layer that formats session events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Solve lifecycle (start/end), session resets
//! - **DEBUG**: Engine progress (direct connection, trees connected, simplification)
//! - **TRACE**: Individual tree iterations

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<bool> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "pathforge=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. Returns
/// whether this process ended up with the console subscriber installed; false
/// means another global subscriber was already set.
pub fn init() -> bool {
    *INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(PlanConsoleLayer)
            .try_init()
            .is_ok();
        if installed {
            print_banner();
        }
        installed
    })
}

// Marks the start of a solve for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since the last solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let line = format!("PathForge v{} - motion planning session", VERSION);
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", line.bright_cyan().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats session events with colors.
pub struct PlanConsoleLayer;

impl<S: Subscriber> Layer<S> for PlanConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("pathforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    engine: Option<String>,
    error: Option<String>,
    dimensions: Option<u64>,
    time_budget_ms: Option<u64>,
    steps: Option<i64>,
    duration_ms: Option<u64>,
    validity_checks: Option<u64>,
    states_sampled: Option<u64>,
    tree_states: Option<u64>,
    generation: Option<u64>,
    before: Option<u64>,
    after: Option<u64>,
    solved: Option<bool>,
    has_oracle: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "engine" => self.engine = Some(s),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "dimensions" => self.dimensions = Some(value),
            "time_budget_ms" => self.time_budget_ms = Some(value),
            "steps" => self.steps = Some(value as i64),
            "duration_ms" => self.duration_ms = Some(value),
            "validity_checks" => self.validity_checks = Some(value),
            "states_sampled" => self.states_sampled = Some(value),
            "tree_states" => self.tree_states = Some(value),
            "generation" => self.generation = Some(value),
            "before" => self.before = Some(value),
            "after" => self.after = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == "steps" {
            self.steps = Some(value);
        } else if value >= 0 {
            self.record_u64(field, value as u64);
        }
    }

    fn record_u128(&mut self, field: &Field, value: u128) {
        self.record_u64(field, u64::try_from(value).unwrap_or(u64::MAX));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "solved" => self.solved = Some(value),
            "has_oracle" => self.has_oracle = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "engine" => self.engine = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "simplified" => format_simplified(v),
        "session_reset" => format_reset(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let dimensions = v.dimensions.unwrap_or(0);
    let budget = v.time_budget_ms.unwrap_or(0);
    let engine = v.engine.as_deref().unwrap_or("engine");
    let oracle = if v.has_oracle.unwrap_or(false) {
        "oracle"
    } else {
        "default validity"
    };

    format!(
        "{} {} Solving │ {} │ {} dimensions │ {} budget │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        engine.white().bold(),
        dimensions.to_formatted_string(&Locale::en).bright_yellow(),
        format_duration_ms(budget).bright_yellow(),
        oracle
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let solved = v.solved.unwrap_or(false);
    let status = if solved {
        "SOLVED".bright_green().bold().to_string()
    } else {
        "NOT SOLVED".bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Solve complete │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        status,
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    );

    if solved {
        let steps = v.steps.unwrap_or(0).max(0) as u64;
        output.push_str(&format!(
            " │ {} states",
            steps.to_formatted_string(&Locale::en).white()
        ));
    }
    if let Some(checks) = v.validity_checks {
        output.push_str(&format!(
            " │ {} validity checks",
            checks
                .to_formatted_string(&Locale::en)
                .bright_magenta()
                .bold()
        ));
    }
    if let Some(sampled) = v.states_sampled.filter(|&n| n > 0) {
        output.push_str(&format!(
            " │ {} samples",
            sampled.to_formatted_string(&Locale::en).white()
        ));
    }
    if let Some(tree_states) = v.tree_states.filter(|&n| n > 0) {
        output.push_str(&format!(
            " │ {} tree states",
            tree_states.to_formatted_string(&Locale::en).white()
        ));
    }
    if let Some(error) = &v.error {
        output.push_str(&format!(" │ {}", error.bright_red()));
    }

    output
}

fn format_simplified(v: &EventVisitor) -> String {
    format!(
        "{} {} Simplified │ {} → {} states",
        format_elapsed(),
        "◀".bright_blue(),
        v.before.unwrap_or(0).to_formatted_string(&Locale::en),
        v.after.unwrap_or(0).to_formatted_string(&Locale::en).white()
    )
}

fn format_reset(v: &EventVisitor) -> String {
    format!(
        "{} {} Session reset │ generation {}",
        format_elapsed(),
        "↺".bright_blue(),
        v.generation.unwrap_or(0).to_formatted_string(&Locale::en)
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
