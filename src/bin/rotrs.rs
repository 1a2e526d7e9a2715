// Rotrs CLI
// Grab rotated pointer sensors and re-emit their motion in the device frame

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use rotrs_core::event::{EventLoop, ReportFramer};
use rotrs_core::output::VirtualPointer;
use rotrs_core::{Config, ProcessorChain};

/// Rotate relative pointer motion from rotated sensors
#[derive(Parser, Debug)]
#[command(name = "rotrs")]
#[command(version)]
#[command(about = "Rotate relative pointer motion from rotated sensors", long_about = None)]
struct Args {
    /// TOML configuration file (default: ~/.config/rotrs/config.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Rotate by this many degrees without a config file
    #[arg(short, long, value_name = "DEGREES", allow_negative_numbers = true)]
    angle: Option<i32>,

    /// Manually specify devices to rotate (can be used multiple times)
    #[arg(short, long, value_name = "DEVICE")]
    devices: Vec<String>,

    /// Enable debug logging, including every rotated event
    #[arg(short, long)]
    verbose: bool,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// List available pointer devices
    #[arg(long)]
    list_devices: bool,
}

/// Per-device processing state
struct DeviceSlot {
    chain: ProcessorChain,
    framer: ReportFramer,
}

/// Main application state
struct Application {
    config: Config,
    args: Args,
    /// Flag to signal event loop to stop
    running: Arc<AtomicBool>,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Resolve the configuration with precedence:
/// --angle > --config > default config path.
fn load_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    if let Some(angle) = args.angle {
        return Ok(Config::single(angle, args.devices.clone()));
    }

    let path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_path()
            .ok_or("no config directory; pass --config or --angle")?,
    };
    log::info!("loading config from {}", path.display());
    Ok(Config::from_toml_path(&path)?)
}

impl Application {
    fn new(args: Args) -> Result<Self, Box<dyn std::error::Error>> {
        let config = load_config(&args)?;
        Ok(Self {
            config,
            args,
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Print the resolved sensors and their coefficients
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        println!("Configuration is valid");
        for sensor in &self.config.sensors {
            let coefficients = rotrs_core::lookup_sin_cos(sensor.rotation.rotation_angle);
            let scope = if sensor.devices.is_empty() {
                "all pointers".to_string()
            } else {
                sensor.devices.join(", ")
            };
            println!(
                "  - {}: {}° ({}) on {}",
                sensor.name, sensor.rotation.rotation_angle, coefficients, scope
            );
        }
        Ok(())
    }

    /// List available pointer devices
    fn list_devices() -> Result<(), Box<dyn std::error::Error>> {
        let devices = EventLoop::list_devices()?;
        println!("Found {} pointer device(s):", devices.len());
        for device in &devices {
            println!("  {}: {} ({})", device.index, device.name, device.path);
        }
        Ok(())
    }

    fn install_signal_handler(&self) -> Result<(), Box<dyn std::error::Error>> {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        let running = self.running.clone();
        std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                log::info!("received signal {}, shutting down", signal);
                running.store(false, Ordering::SeqCst);
            }
        });
        Ok(())
    }

    /// Run the main event loop
    fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.install_signal_handler()?;

        // CLI --devices > union of the sensors' device lists > autodetect
        let device_filter = if !self.args.devices.is_empty() {
            self.args.devices.clone()
        } else {
            self.config.device_filter()
        };

        let mut event_loop = EventLoop::new_with_grab_filtered(&device_filter)?;

        let mut slots: Vec<DeviceSlot> = event_loop
            .devices()
            .iter()
            .map(|device| {
                let chain = self.config.build_chain(&device.name, &device.path);
                if chain.is_empty() {
                    log::warn!("{} grabbed but no sensor applies; passing through", device.name);
                } else {
                    log::info!("{}: {:?}", device.name, chain.names());
                }
                DeviceSlot {
                    chain,
                    framer: ReportFramer::new(),
                }
            })
            .collect();

        let mut output = VirtualPointer::new(
            &self.config.virtual_device_name,
            &event_loop.supported_buttons(),
        )?;

        let result = self.run_main_loop(&mut event_loop, &mut slots, &mut output);

        // Release buttons before the grab goes away
        event_loop.ungrab_all();
        output.close()?;

        result
    }

    fn run_main_loop(
        &self,
        event_loop: &mut EventLoop,
        slots: &mut [DeviceSlot],
        output: &mut VirtualPointer,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let poll_timeout = i32::try_from(self.config.poll_timeout_ms).unwrap_or(i32::MAX);
        let idle_sleep = Duration::from_millis(self.config.idle_sleep_ms);

        log::info!("rotrs is running. Press Ctrl+C to exit.");

        while self.running.load(Ordering::SeqCst) {
            let events = event_loop.poll_for_events(poll_timeout)?;
            if events.is_empty() {
                std::thread::sleep(idle_sleep);
                continue;
            }

            for polled in events {
                let slot = &mut slots[polled.device_index];
                if let Some(mut report) = slot.framer.feed(polled.event) {
                    slot.chain.process_all(report.iter_mut());
                    if let Err(e) = output.emit_report(&report) {
                        log::warn!("error sending output: {}", e);
                    }
                }
            }
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Handle list-devices flag (doesn't require config)
    if args.list_devices {
        return Application::list_devices();
    }

    let app = Application::new(args)?;

    if app.args.check_config {
        return app.validate();
    }

    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["rotrs", "--config", "/tmp/test.toml"]);

        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
        assert!(args.angle.is_none());
        assert!(args.devices.is_empty());
        assert!(!args.verbose);
        assert!(!args.check_config);
        assert!(!args.list_devices);
    }

    #[test]
    fn test_args_with_negative_angle_and_devices() {
        let args = Args::parse_from([
            "rotrs",
            "--angle",
            "-45",
            "--devices",
            "/dev/input/event5",
            "--devices",
            "Kensington Expert Mouse",
            "--verbose",
        ]);

        assert_eq!(args.angle, Some(-45));
        assert_eq!(args.devices, vec!["/dev/input/event5", "Kensington Expert Mouse"]);
        assert!(args.verbose);
    }

    #[test]
    fn test_args_list_devices() {
        let args = Args::parse_from(["rotrs", "--list-devices"]);
        assert!(args.list_devices);
    }

    #[test]
    fn test_angle_overrides_config_file() {
        let args = Args::parse_from([
            "rotrs",
            "--config",
            "/nonexistent/config.toml",
            "--angle",
            "90",
            "-d",
            "Trackball",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.sensors.len(), 1);
        assert_eq!(config.sensors[0].rotation.rotation_angle, 90);
        assert_eq!(config.sensors[0].devices, vec!["Trackball".to_string()]);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = Args::parse_from(["rotrs", "--config", "/nonexistent/config.toml"]);
        assert!(load_config(&args).is_err());
    }
}
