//! Command-line parsing.
//!
//! Flags keep the names operators already use for this exporter
//! (`-web.listen-address`, `-riak.uri`, ...). Single and double dashes are both
//! accepted, as is `--flag=value`.

use riak_exporter_core::error::{ExporterError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(CliOptions),
    ShowHelp,
    ShowVersion,
}

/// Values are `None` when not provided on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliOptions {
    pub config_file: Option<String>,
    pub listen_address: Option<String>,
    pub telemetry_path: Option<String>,
    pub riak_uri: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl Command {
    /// Parse arguments, excluding the program name.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut opts = CliOptions::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let trimmed = arg.trim_start_matches('-');
            if trimmed.len() == arg.len() {
                return Err(ExporterError::Config(format!("unexpected argument {arg}")));
            }
            let (flag, inline) = match trimmed.split_once('=') {
                Some((f, v)) => (f, Some(v.to_string())),
                None => (trimmed, None),
            };

            match flag {
                "h" | "help" => return Ok(Command::ShowHelp),
                "V" | "version" => return Ok(Command::ShowVersion),
                "config" => opts.config_file = Some(take_value(flag, inline, &mut iter)?),
                "web.listen-address" => {
                    opts.listen_address = Some(take_value(flag, inline, &mut iter)?)
                }
                "web.telemetry-path" => {
                    opts.telemetry_path = Some(take_value(flag, inline, &mut iter)?)
                }
                "riak.uri" => opts.riak_uri = Some(take_value(flag, inline, &mut iter)?),
                "riak.timeout-ms" => {
                    let raw = take_value(flag, inline, &mut iter)?;
                    opts.timeout_ms = Some(raw.parse().map_err(|_| {
                        ExporterError::Config("riak.timeout-ms must be a positive integer".into())
                    })?);
                }
                _ => return Err(ExporterError::Config(format!("unknown flag {arg}"))),
            }
        }

        Ok(Command::Run(opts))
    }

    pub fn help() -> &'static str {
        concat!(
            "riak-exporter - Prometheus exporter for Riak node stats\n",
            "\n",
            "USAGE:\n",
            "  riak-exporter [OPTIONS]\n",
            "\n",
            "OPTIONS:\n",
            "  --config <path>                YAML config file (flags override it)\n",
            "  --web.listen-address <addr>    Address to listen on for web interface and telemetry (default: :9104)\n",
            "                                 A bare :port binds all IPv4 interfaces; use [::]:port for IPv6\n",
            "  --web.telemetry-path <path>    Path under which to expose metrics (default: /metrics)\n",
            "  --riak.uri <uri>               The URI which the Riak HTTP API listens on (default: http://localhost:8098)\n",
            "  --riak.timeout-ms <ms>         Timeout for each request to Riak (default: 5000)\n",
            "  -h, --help                     Show this help\n",
            "  -V, --version                  Show version\n",
        )
    }
}

fn take_value(
    flag: &str,
    inline: Option<String>,
    iter: &mut std::slice::Iter<String>,
) -> Result<String> {
    if let Some(v) = inline {
        return Ok(v);
    }
    iter.next()
        .cloned()
        .ok_or_else(|| ExporterError::Config(format!("expected a value after {flag}")))
}
