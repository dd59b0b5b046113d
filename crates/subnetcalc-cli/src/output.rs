//! Result rendering: human table, JSON and CSV

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use subnetcalc_core::{Ipv4, ParsedIp};
use subnetcalc_subnet::Subnet;

use crate::batch::BatchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table output
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

/// Types with a human-readable table form
pub trait HumanOutput {
    fn title(&self) -> &'static str;
    fn rows(&self) -> Vec<(&'static str, String)>;
}

#[derive(Serialize)]
pub struct NetworkResult {
    pub address: String,
    pub prefix: String,
    pub network: String,
}

impl HumanOutput for NetworkResult {
    fn title(&self) -> &'static str {
        "Network Number"
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Address", self.address.clone()),
            ("Prefix", self.prefix.clone()),
            ("Network", self.network.green().to_string()),
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct ArithmeticResult {
    pub address: Ipv4,
    pub operation: &'static str,
    pub offset: i64,
    pub result: Ipv4,
}

impl HumanOutput for ArithmeticResult {
    fn title(&self) -> &'static str {
        "Address Arithmetic"
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Address", self.address.to_string()),
            ("Operation", format!("{} {}", self.operation, self.offset)),
            ("Result", self.result.to_string().green().to_string()),
        ]
    }
}

#[derive(Serialize)]
pub struct BitsResult {
    pub address: Ipv4,
    pub binary: String,
    pub octets: String,
    pub binary_octets: String,
}

impl From<ParsedIp> for BitsResult {
    fn from(parsed: ParsedIp) -> Self {
        Self {
            address: parsed.address,
            binary: parsed.binary,
            octets: parsed
                .octets
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(" "),
            binary_octets: parsed.binary_octets.join("."),
        }
    }
}

impl HumanOutput for BitsResult {
    fn title(&self) -> &'static str {
        "Binary Representation"
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Address", self.address.to_string()),
            ("Binary", self.binary.clone()),
            ("Octets", self.octets.clone()),
            ("Binary octets", self.binary_octets.clone()),
        ]
    }
}

impl HumanOutput for Subnet {
    fn title(&self) -> &'static str {
        "Subnet Report"
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        let host = |ip: Option<Ipv4>| {
            ip.map_or_else(|| "none".dimmed().to_string(), |ip| ip.to_string())
        };
        vec![
            ("Address", self.address.to_string()),
            ("Network", self.network.to_string().green().to_string()),
            ("Prefix", self.prefix.to_string()),
            ("Mask", self.mask.to_string()),
            ("Broadcast", self.broadcast.to_string()),
            ("First host", host(self.first_host)),
            ("Last host", host(self.last_host)),
            ("Usable hosts", self.usable_hosts.to_string()),
            ("Addresses", self.total_addresses.to_string()),
        ]
    }
}

/// Flat batch row, one per input line
#[derive(Debug, Serialize)]
pub struct BatchRecord {
    pub input: String,
    pub network: Option<Ipv4>,
    pub mask: Option<Ipv4>,
    pub broadcast: Option<Ipv4>,
    pub first_host: Option<Ipv4>,
    pub last_host: Option<Ipv4>,
    pub usable_hosts: Option<u64>,
    pub error: Option<String>,
}

impl From<BatchResult> for BatchRecord {
    fn from(batch: BatchResult) -> Self {
        match batch.result {
            Ok(subnet) => Self {
                input: batch.input,
                network: Some(subnet.network),
                mask: Some(subnet.mask),
                broadcast: Some(subnet.broadcast),
                first_host: subnet.first_host,
                last_host: subnet.last_host,
                usable_hosts: Some(subnet.usable_hosts),
                error: None,
            },
            Err(error) => Self {
                input: batch.input,
                network: None,
                mask: None,
                broadcast: None,
                first_host: None,
                last_host: None,
                usable_hosts: None,
                error: Some(error),
            },
        }
    }
}

pub fn print_result<T>(result: &T, format: OutputFormat) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match format {
        OutputFormat::Human => print_human(result),
        OutputFormat::Json => print_json(result, true)?,
        OutputFormat::JsonCompact => print_json(result, false)?,
        OutputFormat::Csv => print_csv(std::slice::from_ref(result), std::io::stdout())?,
    }
    Ok(())
}

pub fn print_batch(records: &[BatchRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for record in records {
                match (&record.network, &record.error) {
                    (Some(network), _) => println!(
                        "{:<24} {} {}",
                        record.input,
                        "→".blue(),
                        network.to_string().green()
                    ),
                    (None, Some(error)) => {
                        println!("{:<24} {} {}", record.input, "✗".red(), error)
                    }
                    (None, None) => {}
                }
            }
        }
        OutputFormat::Json => print_json(&records, true)?,
        OutputFormat::JsonCompact => print_json(&records, false)?,
        OutputFormat::Csv => print_csv(records, std::io::stdout())?,
    }
    Ok(())
}

fn print_human<T: HumanOutput>(result: &T) {
    println!();
    println!("{}", result.title().bold().cyan());
    println!("{}", "─".repeat(50).dimmed());
    for (label, value) in result.rows() {
        println!("{:>15}: {}", label.bold(), value);
    }
    println!();
}

fn print_json<T: Serialize + ?Sized>(result: &T, pretty: bool) -> Result<()> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", serde_json::to_string(result)?);
    }
    Ok(())
}

fn print_csv<T: Serialize, W: Write>(records: &[T], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_string<T: Serialize>(records: &[T]) -> String {
        let mut buf = Vec::new();
        print_csv(records, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_subnet_csv() {
        let subnet = Subnet::calculate("192.168.1.10", "/24").unwrap();
        let csv = csv_string(&[subnet]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "address,network,prefix,mask,broadcast,first_host,last_host,usable_hosts,total_addresses"
        );
        assert_eq!(
            lines.next().unwrap(),
            "192.168.1.10,192.168.1.0,24,255.255.255.0,192.168.1.255,192.168.1.1,192.168.1.254,254,256"
        );
    }

    #[test]
    fn test_batch_record_error_csv() {
        let record = BatchRecord::from(BatchResult {
            input: "1.2.3 /24".to_string(),
            result: Err("bad".to_string()),
        });
        let csv = csv_string(&[record]);
        assert!(csv.ends_with("1.2.3 /24,,,,,,,bad\n"));
    }

    #[test]
    fn test_bits_result() {
        let parsed = subnetcalc_core::parse_ip("10.0.0.5").unwrap();
        let bits = BitsResult::from(parsed);
        assert_eq!(bits.octets, "10 0 0 5");
        assert_eq!(bits.binary_octets, "00001010.00000000.00000000.00000101");
        assert_eq!(bits.rows().len(), 4);
    }

    #[test]
    fn test_network_result_json() {
        let result = NetworkResult {
            address: "10.0.0.5".to_string(),
            prefix: "/8".to_string(),
            network: "10.0.0.0".to_string(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"address":"10.0.0.5","prefix":"/8","network":"10.0.0.0"}"#
        );
    }

    #[test]
    fn test_subnet_rows_without_hosts() {
        colored::control::set_override(false);
        let subnet = Subnet::calculate("10.0.0.1", "/32").unwrap();
        let rows = subnet.rows();
        assert!(rows.contains(&("First host", "none".to_string())));
        assert!(rows.contains(&("Usable hosts", "0".to_string())));
    }
}
