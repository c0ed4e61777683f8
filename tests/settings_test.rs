use pizzeria::config::load_settings;
use std::io::Write;
use std::time::Duration;

/// Environment overrides win over the file. Kept as the only test in this
/// binary because it mutates process environment.
#[test]
fn test_environment_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "buffer_size = 4").unwrap();
    writeln!(file, "[registration]").unwrap();
    writeln!(file, "banner_ms = 3000").unwrap();
    writeln!(file, "submit_delay_ms = 900").unwrap();

    std::env::set_var("PIZZERIA__REGISTRATION__BANNER_MS", "1200");
    let settings = load_settings(Some(file.path()));
    std::env::remove_var("PIZZERIA__REGISTRATION__BANNER_MS");

    let settings = settings.unwrap();
    assert_eq!(settings.buffer_size, 4);
    assert_eq!(settings.registration.banner_duration(), Duration::from_millis(1_200));
    assert_eq!(settings.registration.submit_delay(), Duration::from_millis(900));
    assert_eq!(settings.order.submit_delay(), Duration::from_millis(2_000));
}
