// Admin API path constants for the aceproxy gateway

pub mod admin_api_path {
    // API target configs
    pub const API_CONFIG: &str = "/admin/api-config";
    pub const API_CONFIG_TEST: &str = "/admin/api-config/test";

    // Request logs
    pub const LOGS: &str = "/admin/logs";
    pub const LOGS_EXPORT: &str = "/admin/logs/export";
    pub const LOGS_CLEAR: &str = "/admin/logs/clear";

    // Statistics
    pub const STATS: &str = "/admin/stats";
    pub const STATS_REALTIME: &str = "/admin/stats/realtime";
    pub const STATS_API_TABLE: &str = "/admin/stats/api-table";
}

/// Path of a single API target config, addressed by its unique name.
pub fn api_config_item(name: &str) -> String {
    format!("{}/{}", admin_api_path::API_CONFIG, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_item_path() {
        assert_eq!(api_config_item("openai"), "/admin/api-config/openai");
    }
}
