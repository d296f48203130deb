//! Audio device listing command.

use clap::Args;
use solovox_io::{AudioBackend, CpalBackend};

#[derive(Args)]
pub struct DevicesArgs {}

pub fn run(_args: DevicesArgs) -> anyhow::Result<()> {
    let backend = CpalBackend::new();
    let devices = backend.list_devices()?;

    if devices.is_empty() {
        println!("No audio output devices found.");
        return Ok(());
    }

    let default_name = backend
        .default_output_device()?
        .map(|device| device.name);

    println!("Available Output Devices");
    println!("========================\n");
    for (index, device) in devices.iter().enumerate() {
        let marker = if Some(&device.name) == default_name.as_ref() {
            " (default)"
        } else {
            ""
        };
        println!(
            "  [{}] {} ({} Hz){}",
            index, device.name, device.default_sample_rate, marker
        );
    }

    println!();
    println!("Tip: select a device with a partial name:");
    println!("  solovox play --output \"USB\"");
    Ok(())
}
