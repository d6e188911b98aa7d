//! gpuprobe
//!
//! Opens a device (live adapter or recorded profile), collects one
//! capability snapshot and prints it as JSON on stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use probe_core::{request_gpu_info, GpuDevice, GpuInfo};
use probe_render::{request_adapter_device, wgpu, AdapterRequest};
use probe_services::{
    AdapterSettings, BackendName, DeviceProfile, DeviceSource, PowerPreference, ProbeSettings,
    ProfileDevice,
};
use tracing_subscriber::EnvFilter;

/// Identify the GPU and report its compute limits.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (JSON)
    #[clap(short, long)]
    settings: Option<PathBuf>,
    /// Replay a recorded device profile instead of opening an adapter
    #[clap(short, long)]
    profile: Option<PathBuf>,
    /// Print single-line JSON
    #[clap(long)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::info!("gpuprobe v{}", probe_core::VERSION);

    let settings = resolve_settings(&cli)?;
    let info = probe(&settings)?;

    let json = if settings.output.pretty {
        serde_json::to_string_pretty(&info)?
    } else {
        serde_json::to_string(&info)?
    };
    println!("{json}");
    Ok(())
}

/// Settings file first, then command-line overrides
fn resolve_settings(cli: &Cli) -> Result<ProbeSettings> {
    let mut settings = match &cli.settings {
        Some(path) => ProbeSettings::load(path)?,
        None => ProbeSettings::default(),
    };
    if let Some(profile) = &cli.profile {
        settings.source = DeviceSource::Profile;
        settings.profile_path = Some(profile.clone());
    }
    if cli.compact {
        settings.output.pretty = false;
    }
    Ok(settings)
}

fn probe(settings: &ProbeSettings) -> Result<GpuInfo> {
    match settings.source {
        DeviceSource::Adapter => {
            let mut device = request_adapter_device(&adapter_request(&settings.adapter))?;
            collect(&mut device)
        }
        DeviceSource::Profile => {
            let path = settings
                .profile_path
                .as_deref()
                .context("profile source selected but no profile_path given")?;
            let mut device = ProfileDevice::new(DeviceProfile::load(path)?);
            collect(&mut device)
        }
    }
}

fn collect(device: &mut dyn GpuDevice) -> Result<GpuInfo> {
    let info = request_gpu_info(device).context("collecting gpu info")?;
    tracing::info!(
        renderer = %info.renderer_name,
        vendor = %info.vendor,
        model = %info.model,
        "gpu identified"
    );
    if !info.is_opengl31_or_above() {
        tracing::warn!(
            major = info.major_version,
            minor = info.minor_version,
            "device reports no GL ES 3.1 compute support"
        );
    }
    Ok(info)
}

fn adapter_request(settings: &AdapterSettings) -> AdapterRequest {
    let backends = if settings.backends.is_empty() {
        wgpu::Backends::all()
    } else {
        settings
            .backends
            .iter()
            .fold(wgpu::Backends::empty(), |acc, name| acc | backend_bits(*name))
    };
    let power_preference = match settings.power_preference {
        PowerPreference::None => wgpu::PowerPreference::None,
        PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
        PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
    };
    AdapterRequest {
        backends,
        power_preference,
    }
}

fn backend_bits(name: BackendName) -> wgpu::Backends {
    match name {
        BackendName::Vulkan => wgpu::Backends::VULKAN,
        BackendName::Metal => wgpu::Backends::METAL,
        BackendName::Dx12 => wgpu::Backends::DX12,
        BackendName::Gl => wgpu::Backends::GL,
        BackendName::BrowserWebgpu => wgpu::Backends::BROWSER_WEBGPU,
    }
}
