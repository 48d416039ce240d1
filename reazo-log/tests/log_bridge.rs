//! The `log` facade bridge. The global logger can only be set once per
//! process, so these checks live in their own test binary.

use reazo_log::{Level, current_level, install_log_bridge, set_level};

fn enabled(level: log::Level) -> bool {
    let metadata = log::Metadata::builder()
        .level(level)
        .target("reazo::bridge")
        .build();
    log::logger().enabled(&metadata)
}

#[test]
fn test_bridge_installs_once_and_follows_level() {
    install_log_bridge().unwrap();
    assert!(install_log_bridge().is_err());
    assert_eq!(log::max_level(), current_level().to_level_filter());

    set_level(Level::Warn);
    assert_eq!(log::max_level(), log::LevelFilter::Warn);

    // Open the facade filter so the bridge alone decides.
    log::set_max_level(log::LevelFilter::Trace);
    assert!(!enabled(log::Level::Info));
    assert!(enabled(log::Level::Warn));
    assert!(enabled(log::Level::Error));
    assert!(!log::log_enabled!(log::Level::Debug));

    set_level(Level::Trace);
    assert!(enabled(log::Level::Trace));
    log::info!(target: "reazo::bridge", "bridged record");
    log::logger().flush();
}
