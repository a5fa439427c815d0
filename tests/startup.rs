use library_api::config::load_dotenv_from;
use library_api::logging::{env_filter_from, DEFAULT_LOG_FILTER};
use std::fs;

#[test]
fn log_filter_sees_directives_from_env_file() {
    let dir = std::env::temp_dir().join(format!("library-api-startup-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(".env");
    fs::write(&path, "LIBRARY_API_STARTUP_LOG=library_api=trace\n").unwrap();

    assert_eq!(
        env_filter_from("LIBRARY_API_STARTUP_LOG").to_string(),
        tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER).to_string()
    );

    assert_eq!(load_dotenv_from(&path).as_deref(), Some(path.as_path()));
    let filter = env_filter_from("LIBRARY_API_STARTUP_LOG").to_string();
    assert!(filter.contains("library_api=trace"), "{}", filter);

    fs::remove_dir_all(&dir).ok();
}
