// Stable error codes reported in API error bodies

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
}

pub mod audit {
    pub const INSERT_FAILED: &str = "AUDIT_2001";
}

pub mod database {
    pub const CONNECTION_FAILED: &str = "DB_4001";
}

pub mod server {
    pub const NOT_FOUND: &str = "SERVER_5001";
    pub const INTERNAL: &str = "SERVER_5002";
}
