use std::time::{Duration, Instant};

use ::time::UtcOffset;
use alloy::{primitives::U256, uint};
use tracing_subscriber::{EnvFilter, fmt::time::OffsetTime};

pub const SEPARATORER: &str = "===============================================================================================";
pub const SEPARATOR: &str = "-----------------------------------------------------------------------------------------------";

pub const ETHER: U256 = uint!(1_000_000_000_000_000_000_U256);

pub fn init_logs() {
    let offset = UtcOffset::from_hms(1, 0, 0).expect("should get CET offset");
    let time_format =
        time::format_description::parse("[year]-[month]-[day]T[hour]:[minute]:[second]").unwrap();
    let timer = OffsetTime::new(offset, time_format);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_env_filter(env_filter)
        .init();
}

pub fn measure_start(label: &str) -> (String, Instant) {
    (label.to_string(), Instant::now())
}

pub fn measure_end(start: (String, Instant)) -> Duration {
    let elapsed = start.1.elapsed();
    tracing::debug!("Elapsed: {:.2?} for '{}'", elapsed, start.0);
    elapsed
}

pub fn wei_to_eth(wei: U256) -> f64 {
    let wei_per_eth = ETHER;
    let wei_f64 = wei.to_string().parse::<f64>().unwrap();
    let wei_per_eth_f64 = wei_per_eth.to_string().parse::<f64>().unwrap();

    wei_f64 / wei_per_eth_f64
}
