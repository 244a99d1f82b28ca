use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use console_core::{ConsoleCore, ConsoleEvent, RotationDial};
use gateway::{ActuatorGateway, HttpActuatorGateway, SimulatedActuatorGateway};
use shared::domain::{PlantType, ShutterAction};
use tracing::info;

mod config;

/// Operator console for the gardening robot. Runs a scripted control
/// session; the interactive surface wires the same calls to widgets.
#[derive(Parser, Debug)]
struct Args {
    /// Drive the built-in robot simulator instead of a live controller.
    #[arg(long)]
    simulate: bool,
    /// Robot controller base URL; overrides the configured value.
    #[arg(long)]
    robot_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = config::load_settings();

    let gateway: Arc<dyn ActuatorGateway> = if args.simulate {
        info!("console: using the simulated gateway");
        Arc::new(SimulatedActuatorGateway::new())
    } else {
        let robot_url = args.robot_url.unwrap_or_else(|| settings.robot_url.clone());
        info!(robot_url, "console: using the HTTP gateway");
        Arc::new(HttpActuatorGateway::new(robot_url))
    };
    let advisory = advisory::select_provider(settings.remote_credentials());
    let core = ConsoleCore::new(gateway, advisory);

    let mut events = core.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                ConsoleEvent::ScanStateChanged(state) => println!("probe: {state:?}"),
                ConsoleEvent::AdvisoryReady(text) => println!("advisory: {text}"),
                ConsoleEvent::SunPositionUpdated(azimuth) => println!("sun: {azimuth}"),
                ConsoleEvent::CommandFailed { command, reason } => {
                    println!("failed: {command:?}: {reason}")
                }
                ConsoleEvent::StateChanged(_) => {}
            }
        }
    });

    core.refresh_sun_position().await?;
    core.set_platform_height(65).await?;
    core.control_shutter(ShutterAction::Down).await?;

    // A drag across the dial: the surface feeds pointer positions relative
    // to the widget center and forwards each emitted angle to the core.
    let dial = RotationDial::new();
    {
        let session = dial.begin();
        for (px, py) in [(240.0, 140.0), (230.0, 230.0), (140.0, 240.0)] {
            if let Some(angle) = session.update(px, py, 140.0, 140.0) {
                core.rotate_to(angle).await;
            }
        }
    }

    core.trigger_watering(PlantType::ShadeLoving).await?;
    core.trigger_scan().await?;

    let state = core.state().await;
    println!(
        "session end: height {} rotation {} shutter {}%",
        state.platform_height, state.rotation_angle, state.shutter_level
    );
    if let Some(metrics) = state.last_metrics {
        println!(
            "last reading: moisture {}% ph {} nitrogen {} ppm temperature {} C light {} lux",
            metrics.moisture, metrics.ph, metrics.nitrogen, metrics.temperature,
            metrics.light_level
        );
    }
    printer.abort();
    Ok(())
}
