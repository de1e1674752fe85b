use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Maximum allowed duration in millis for the due window when querying
    /// pending notifications. This is used to avoid having clients ask for
    /// notifications in a timespan of several years which will take a lot
    /// of time to compute and is also not very useful information to query
    /// about anyways.
    pub pending_notifications_query_duration_limit: i64,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };
        Self {
            port,
            pending_notifications_query_duration_limit: 1000 * 60 * 60 * 24 * 62, // 62 days
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
