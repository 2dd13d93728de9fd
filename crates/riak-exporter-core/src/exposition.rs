//! Prometheus text exposition format (version 0.0.4).
//!
//! Output matches the reference Prometheus client encoder for the same metrics:
//! families sorted by name, `# HELP` then `# TYPE` then the sample, and float
//! values formatted with the shortest round-trip `%g` representation.

use std::fmt::Write;

use crate::snapshot::MetricSnapshot;

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

const EXPORTER_SUBSYSTEM: &str = "exporter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Gauge,
    Counter,
}

impl Kind {
    fn as_str(self) -> &'static str {
        match self {
            Kind::Gauge => "gauge",
            Kind::Counter => "counter",
        }
    }
}

struct Family {
    name: String,
    help: String,
    kind: Kind,
    labels: Vec<(&'static str, String)>,
    value: f64,
}

/// Render a snapshot in Prometheus text format.
pub fn render(snapshot: &MetricSnapshot) -> String {
    let ns = snapshot.namespace.as_str();
    let mut families: Vec<Family> = snapshot
        .gauges
        .iter()
        .map(|g| Family {
            name: g.name.clone(),
            help: g.help.clone(),
            kind: Kind::Gauge,
            labels: Vec::new(),
            value: g.value,
        })
        .collect();

    families.push(Family {
        name: format!("{ns}_{EXPORTER_SUBSYSTEM}_last_scrape_duration_seconds"),
        help: "Duration of the last scrape of metrics from Riak.".into(),
        kind: Kind::Gauge,
        labels: Vec::new(),
        value: snapshot.last_scrape_duration_seconds,
    });
    families.push(Family {
        name: format!("{ns}_{EXPORTER_SUBSYSTEM}_scrapes_total"),
        help: "Total number of times Riak was scraped for metrics.".into(),
        kind: Kind::Counter,
        labels: Vec::new(),
        value: snapshot.scrapes_total as f64,
    });
    families.push(Family {
        name: format!("{ns}_{EXPORTER_SUBSYSTEM}_last_scrape_error"),
        help: "Whether the last scrape of metrics from Riak resulted in an error (1 for error, 0 for success).".into(),
        kind: Kind::Gauge,
        labels: Vec::new(),
        value: bool_value(snapshot.last_scrape_error),
    });
    families.push(Family {
        name: format!("{ns}_up"),
        help: "Whether the Riak node is up.".into(),
        kind: Kind::Gauge,
        labels: Vec::new(),
        value: bool_value(snapshot.up),
    });
    families.push(Family {
        name: format!("{ns}_{EXPORTER_SUBSYSTEM}_build_info"),
        help: format!(
            "A metric with a constant '1' value labeled by version from which {ns}_{EXPORTER_SUBSYSTEM} was built."
        ),
        kind: Kind::Gauge,
        labels: vec![("version", snapshot.build_version.clone())],
        value: 1.0,
    });

    // A stat key may collide with a self-metric; the later entry wins.
    families.sort_by(|a, b| a.name.cmp(&b.name));
    families.dedup_by(|later, earlier| {
        if later.name == earlier.name {
            std::mem::swap(later, earlier);
            true
        } else {
            false
        }
    });

    let mut out = String::new();
    for f in &families {
        let _ = writeln!(out, "# HELP {} {}", f.name, escape_help(&f.help));
        let _ = writeln!(out, "# TYPE {} {}", f.name, f.kind.as_str());
        if f.labels.is_empty() {
            let _ = writeln!(out, "{} {}", f.name, format_value(f.value));
        } else {
            let label_str = f
                .labels
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{}{{{}}} {}", f.name, label_str, format_value(f.value));
        }
    }
    out
}

fn bool_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Format a sample value like the reference encoder: shortest `%g`, exponent
/// form outside `1e-4 <= |v| < 1e6`.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        return "NaN".into();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf".into() } else { "-Inf".into() };
    }
    if v == 0.0 {
        return "0".into();
    }
    if v == 1.0 {
        return "1".into();
    }
    if v == -1.0 {
        return "-1".into();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.2345e3".
    let sci = format!("{:e}", v);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let (neg, mantissa) = match mantissa.strip_prefix('-') {
        Some(m) => (true, m),
        None => (false, mantissa),
    };
    let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();

    let mut out = String::new();
    if neg {
        out.push('-');
    }

    if !(-4..6).contains(&exp) {
        if let Some((first, rest)) = digits.split_first() {
            out.push(*first as char);
            if !rest.is_empty() {
                out.push('.');
                out.extend(rest.iter().map(|&d| d as char));
            }
        }
        let sign = if exp < 0 { '-' } else { '+' };
        let _ = write!(out, "e{}{:02}", sign, exp.abs());
        return out;
    }

    // Decimal point sits after `dp` digits.
    let dp = exp + 1;
    let nd = digits.len() as i32;
    if dp > 0 {
        for i in 0..dp {
            out.push(digit_at(&digits, i));
        }
    } else {
        out.push('0');
    }
    let frac = (nd - dp).max(0);
    if frac > 0 {
        out.push('.');
        for i in 0..frac {
            out.push(digit_at(&digits, dp + i));
        }
    }
    out
}

fn digit_at(digits: &[u8], i: i32) -> char {
    if i >= 0 && (i as usize) < digits.len() {
        digits[i as usize] as char
    } else {
        '0'
    }
}
