#[macro_use]
extern crate log;

use std::time::Duration;

use env_logger::Env;
use motion_lab::app::{App, NAMESPACE};
use motion_lab::config::Config;
use simulator::{
    tick_period, Clock, CountingCanvas, JsonStore, ScriptedKeypad, SimulatedImu,
};

const DEFAULT_SCRIPT: &str = "2500:1,5000:+,5100:+,7000:bs,7500:3,12000:del,12500:4,16000:r";

fn load_config(path: Option<&str>) -> Result<Config, String> {
    let path = match path {
        Some(path) => path,
        None => return Ok(Config::default()),
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Read config file {} failed: {}", path, e))?;
    serde_yaml::from_str(&text).map_err(|e| format!("Parse config file {} failed: {}", path, e))
}

fn parse<T>(matches: &clap::ArgMatches, name: &str, default: &str) -> Result<T, String>
where
    T: std::str::FromStr,
{
    let value = matches.value_of(name).unwrap_or(default);
    value.parse::<T>().map_err(|_| format!("{} {} not a number", name, value))
}

fn run(matches: &clap::ArgMatches) -> Result<(), String> {
    let config = load_config(matches.value_of("config"))?;
    let rate: u64 = parse(matches, "rate", "30")?;
    let duration: u64 = parse(matches, "duration", "20")?;
    let period = tick_period(rate)?;

    let clock = Clock::default();
    let imu = SimulatedImu::new(clock.clone(), Duration::from_secs(5));
    let script = matches.value_of("keys").unwrap_or(DEFAULT_SCRIPT);
    let keypad = ScriptedKeypad::parse(script, clock.clone(), period * 3)?;
    let store_path = matches.value_of("store").unwrap_or("motion-lab.json");
    let store = JsonStore::open(store_path, NAMESPACE)
        .map_err(|e| format!("Open store {} failed: {:?}", store_path, e))?;

    let mut app = App::new(imu, keypad, store, config, clock.now())
        .map_err(|e| format!("Startup failed: {:?}", e))?;
    let mut canvas = CountingCanvas::default();
    let realtime = matches.is_present("realtime");
    let end = Duration::from_secs(duration);
    while clock.now() < end {
        app.tick(clock.now(), &mut canvas);
        clock.set(clock.now() + period);
        if realtime {
            std::thread::sleep(period);
        }
    }
    info!("Ran {} frames, {} primitives, ended in {}", canvas.frames, canvas.primitives, app.kind());
    info!("All-time record {:.2}G", app.state().peak.all_time_high());
    Ok(())
}

fn arg(name: &'static str) -> clap::Arg<'static, 'static> {
    clap::Arg::with_name(name).long(name).takes_value(true)
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let matches = clap::App::new("simulator")
        .version("0.1")
        .about("Motion lab simulator")
        .arg(arg("config").help("YAML config file"))
        .arg(arg("store").help("JSON key-value store file"))
        .arg(arg("rate").help("Ticks per second"))
        .arg(arg("duration").help("Simulated seconds"))
        .arg(arg("keys").help("Key script, millis:key separated by comma"))
        .arg(clap::Arg::with_name("realtime").long("realtime").help("Pace ticks in wall time"))
        .get_matches();
    if let Err(error) = run(&matches) {
        error!("{}", error);
        std::process::exit(1);
    }
}
