//! Scoped call profiler.
//!
//! Replaces decorator-style profiling with an explicit wrapper: collection
//! begins before the command handler runs, ends on every exit path, and the
//! report is printed afterwards. Handlers and support code record named
//! scopes with [`scope`]; scopes nest, and a child's elapsed time is
//! excluded from the parent's self time.
//!
//! The collector is thread-local. One CLI invocation runs one command, so
//! no cross-thread coordination exists or is needed.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Maximum number of report lines printed, header included.
pub const REPORT_LINE_LIMIT: usize = 100;

thread_local! {
    static COLLECTOR: RefCell<Option<Collector>> = const { RefCell::new(None) };
}

struct ActiveScope {
    label: String,
    started: Instant,
    child_time: Duration,
}

/// Accumulated statistics for one scope label.
#[derive(Debug, Clone, Default)]
pub struct ScopeStat {
    /// Number of times the scope was entered.
    pub calls: u64,
    /// Self time: elapsed time minus time spent in nested scopes.
    pub total: Duration,
    /// Elapsed time including nested scopes.
    pub cumulative: Duration,
}

#[derive(Default)]
struct Collector {
    stack: Vec<ActiveScope>,
    stats: HashMap<String, ScopeStat>,
    started: Option<Instant>,
}

impl Collector {
    fn enter(&mut self, label: &str) {
        self.stack.push(ActiveScope {
            label: label.to_string(),
            started: Instant::now(),
            child_time: Duration::ZERO,
        });
    }

    fn exit(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let elapsed = frame.started.elapsed();
        let self_time = elapsed.saturating_sub(frame.child_time);
        if let Some(parent) = self.stack.last_mut() {
            parent.child_time += elapsed;
        }
        let stat = self.stats.entry(frame.label).or_default();
        stat.calls += 1;
        stat.total += self_time;
        stat.cumulative += elapsed;
    }
}

/// One row of the final report.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub label: String,
    pub stat: ScopeStat,
}

/// Collected profile for a single command invocation.
#[derive(Debug, Clone)]
pub struct Report {
    rows: Vec<ReportRow>,
    elapsed: Duration,
}

impl Report {
    fn from_collector(collector: Collector) -> Self {
        let elapsed = collector
            .started
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO);
        let mut rows: Vec<ReportRow> = collector
            .stats
            .into_iter()
            .map(|(label, stat)| ReportRow { label, stat })
            .collect();
        // Sort keys in descending significance: cumulative, self time, calls.
        rows.sort_by(|a, b| {
            b.stat
                .cumulative
                .cmp(&a.stat.cumulative)
                .then(b.stat.total.cmp(&a.stat.total))
                .then(b.stat.calls.cmp(&a.stat.calls))
                .then(a.label.cmp(&b.label))
        });
        Self { rows, elapsed }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Render the report, truncated to `limit` lines.
    pub fn lines(&self, limit: usize) -> Vec<String> {
        let mut out = Vec::new();
        out.push(format!(
            "{} scopes profiled in {:.3}s",
            self.rows.len(),
            self.elapsed.as_secs_f64()
        ));
        out.push(format!(
            "{:>8}  {:>10}  {:>10}  {}",
            "calls", "tottime", "cumtime", "scope"
        ));
        for row in &self.rows {
            out.push(format!(
                "{:>8}  {:>10.3}  {:>10.3}  {}",
                row.stat.calls,
                row.stat.total.as_secs_f64() * 1000.0,
                row.stat.cumulative.as_secs_f64() * 1000.0,
                row.label
            ));
        }
        out.truncate(limit);
        out
    }
}

/// Record a named scope around `f` when a collector is active.
/// With profiling disabled this is a direct call with no bookkeeping.
pub fn scope<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let active = COLLECTOR.with(|c| {
        let mut slot = c.borrow_mut();
        match slot.as_mut() {
            Some(collector) => {
                collector.enter(label);
                true
            }
            None => false,
        }
    });

    let out = f();

    if active {
        COLLECTOR.with(|c| {
            if let Some(collector) = c.borrow_mut().as_mut() {
                collector.exit();
            }
        });
    }
    out
}

/// Run `f` under a fresh collector and return its result with the report.
///
/// Collection ends on every exit path: the report is produced whether `f`
/// returns `Ok` or `Err`.
pub fn collect<T>(label: &str, f: impl FnOnce() -> T) -> (T, Report) {
    COLLECTOR.with(|c| {
        *c.borrow_mut() = Some(Collector {
            started: Some(Instant::now()),
            ..Default::default()
        });
    });

    let out = scope(label, f);

    let collector = COLLECTOR
        .with(|c| c.borrow_mut().take())
        .unwrap_or_default();
    (out, Report::from_collector(collector))
}

/// Execute `f`, profiling it when `enabled` and printing at most
/// [`REPORT_LINE_LIMIT`] report lines to stdout. The return value of `f`
/// passes through unchanged either way.
pub fn profiled<T>(enabled: bool, label: &str, f: impl FnOnce() -> T) -> T {
    if !enabled {
        return f();
    }
    let (out, report) = collect(label, f);
    for line in report.lines(REPORT_LINE_LIMIT) {
        println!("{}", line);
    }
    out
}
