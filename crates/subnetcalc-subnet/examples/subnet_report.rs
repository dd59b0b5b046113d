//! Subnet report example
//!
//! Run with: cargo run -p subnetcalc-subnet --example subnet_report

use subnetcalc_core::{carry_subtract, carry_sum, parse_ip, Ipv4};
use subnetcalc_subnet::Subnet;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("subnetcalc - Subnet Report Example\n");

    let subnet = Subnet::calculate("192.168.1.10", "/24")?;

    println!("Subnet: {}", subnet);
    println!("─────────────────────────────");
    println!("Network:       {}", subnet.network);
    println!("Mask:          {}", subnet.mask);
    println!("Broadcast:     {}", subnet.broadcast);
    println!("First usable:  {}", format_host(subnet.first_host));
    println!("Last usable:   {}", format_host(subnet.last_host));
    println!("Usable hosts:  {}", subnet.usable_hosts);
    println!("Prefix length: {}", subnet.prefix);

    println!("\nBinary views of {}:", subnet.address);
    let parsed = parse_ip("192.168.1.10")?;
    println!("  {}", parsed.binary);
    println!("  {}", parsed.binary_octets.join("."));

    println!("\nOctet arithmetic:");
    println!("192.168.1.255 + 1 = {}", Ipv4::from(carry_sum([192, 168, 1, 255], 1)?));
    println!("192.168.2.0 - 1   = {}", Ipv4::from(carry_subtract("192.168.2.0", 1)?));

    Ok(())
}

fn format_host(host: Option<Ipv4>) -> String {
    host.map_or_else(|| "none".to_string(), |ip| ip.to_string())
}
