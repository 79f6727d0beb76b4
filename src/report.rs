//! Text output of the `lanebench` binary: the machine banner and the
//! results table.

use std::fmt;
use std::fs;
use std::process::Command;
use std::thread;

use chrono::{DateTime, Local};
use log::debug;

use crate::bench::BenchmarkResult;
use crate::kind::{NumericKind, Operation};
use crate::simd::platform::{self, Isa};

/// Width of the results table, rules included.
pub const TABLE_WIDTH: usize = 72;

/// Width of the rule under the banner.
pub const BANNER_WIDTH: usize = 80;

const TIME_UNITS: [&str; 5] = ["ms", "s", "m", "hr", "d"];
const TIME_CONVERSIONS: [f64; 4] = [1000.0, 60.0, 60.0, 24.0];

/// Formats a millisecond count in the largest unit it reaches, with at most
/// two decimals: `1500` is `"1.5 s"`, `90_000` is `"1.5 m"`.
pub fn format_time(milliseconds: u64) -> String {
    let mut time = milliseconds as f64;
    let mut unit = 0;

    while unit < TIME_CONVERSIONS.len() && time >= TIME_CONVERSIONS[unit] {
        time /= TIME_CONVERSIONS[unit];
        unit += 1;
    }

    let fixed = format!("{time:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", TIME_UNITS[unit])
}

/// Pads `text` with spaces to `width` columns, the extra space going right.
/// Text at least `width` wide is returned as is.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }

    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

pub fn rule(fill: char, width: usize) -> String {
    fill.to_string().repeat(width)
}

fn table_line(cells: [&str; 5]) -> String {
    format!(
        "| {} | {} | {} | {} | {} |",
        center(cells[0], 10),
        center(cells[1], 10),
        center(cells[2], 12),
        center(cells[3], 12),
        center(cells[4], 12)
    )
}

/// Builds the results table row by row, with a rule between kinds.
#[derive(Debug, Default)]
pub struct Table {
    previous: Option<NumericKind>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top rule, column titles and the rule under them.
    pub fn header(&self) -> String {
        let rule = rule('-', TABLE_WIDTH);
        let titles = table_line(["Type", "Operation", "Vector Size", "Traditional", "SIMD"]);
        format!("{rule}\n{titles}\n{rule}")
    }

    /// The line for one finished case, preceded by a rule when the kind
    /// changed since the last row.
    pub fn row(&mut self, kind: NumericKind, operation: Operation, result: &BenchmarkResult) -> String {
        let lane_width = result.lane_width.to_string();
        let scalar = format_time(result.scalar_millis);
        let vector = format_time(result.vector_millis);
        self.line(kind, [kind.name(), operation.name(), &lane_width, &scalar, &vector])
    }

    /// The line for a case that did not produce a timing.
    pub fn failed_row(&mut self, kind: NumericKind, operation: Operation) -> String {
        self.line(kind, [kind.name(), operation.name(), "-", "failed", "failed"])
    }

    pub fn footer(&self) -> String {
        rule('-', TABLE_WIDTH)
    }

    fn line(&mut self, kind: NumericKind, cells: [&str; 5]) -> String {
        let line = table_line(cells);
        let separated = matches!(self.previous, Some(previous) if previous != kind);
        self.previous = Some(kind);

        if separated {
            format!("{}\n{line}", rule('-', TABLE_WIDTH))
        } else {
            line
        }
    }
}

/// Description of the host printed above the results.
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub machine_name: String,
    pub processor_count: usize,
    pub cpu_model: Option<String>,
    pub cpu_mhz: Option<String>,
    pub total_memory_mb: Option<u64>,
    pub isa: Option<Isa>,
    pub started: DateTime<Local>,
}

impl SystemInfo {
    /// Queries the host. Every field that cannot be read is left empty
    /// rather than failing the run.
    pub fn collect() -> Self {
        let cpuinfo = fs::read_to_string("/proc/cpuinfo").unwrap_or_default();
        let meminfo = fs::read_to_string("/proc/meminfo").unwrap_or_default();

        let isa = match platform::detect_isa() {
            Ok(isa) => Some(isa),
            Err(e) => {
                debug!("{e}");
                None
            }
        };

        Self {
            machine_name: machine_name(),
            processor_count: thread::available_parallelism().map_or(1, |n| n.get()),
            cpu_model: cpuinfo_field(&cpuinfo, "model name")
                .or_else(|| cpuinfo_field(&cpuinfo, "Hardware"))
                .or_else(|| sysctl("machdep.cpu.brand_string")),
            cpu_mhz: cpuinfo_field(&cpuinfo, "cpu MHz"),
            total_memory_mb: meminfo_total_mb(&meminfo),
            isa,
            started: Local::now(),
        }
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_unknown(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or("unknown")
        }

        writeln!(f, "Machine Name: {}", self.machine_name)?;
        writeln!(f, "Processor Count: {}", self.processor_count)?;
        writeln!(f, "Processor Name: {}", or_unknown(&self.cpu_model))?;
        if let Some(mhz) = &self.cpu_mhz {
            writeln!(f, "Processor Speed: {mhz} MHz")?;
        }
        if let Some(mb) = self.total_memory_mb {
            writeln!(f, "Total Memory: {mb} MB")?;
        }
        writeln!(f, "Started: {}", self.started.format("%Y-%m-%d %H:%M:%S"))?;

        match self.isa {
            Some(isa) => {
                writeln!(f, "Vector Unit: {isa}")?;
                writeln!(f, "Lane Widths:")?;
                for kind in NumericKind::ALL {
                    writeln!(
                        f,
                        "  {}: {}",
                        kind.name(),
                        isa.register_bytes() / kind.byte_width()
                    )?;
                }
            }
            None => writeln!(f, "Vector Unit: none detected")?,
        }
        Ok(())
    }
}

fn machine_name() -> String {
    ["/proc/sys/kernel/hostname", "/etc/hostname"]
        .iter()
        .filter_map(|path| fs::read_to_string(path).ok())
        .map(|name| name.trim().to_string())
        .chain(["HOSTNAME", "COMPUTERNAME"].iter().filter_map(|var| std::env::var(var).ok()))
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn sysctl(key: &str) -> Option<String> {
    let output = Command::new("sysctl").arg("-n").arg(key).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Value of the first `key : value` line in `/proc/cpuinfo` text.
fn cpuinfo_field(cpuinfo: &str, key: &str) -> Option<String> {
    cpuinfo.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        (name.trim() == key && !value.trim().is_empty()).then(|| value.trim().to_string())
    })
}

/// `MemTotal` of `/proc/meminfo` text, in megabytes.
fn meminfo_total_mb(meminfo: &str) -> Option<u64> {
    let line = meminfo.lines().find(|line| line.starts_with("MemTotal:"))?;
    let kib: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kib / 1024)
}
