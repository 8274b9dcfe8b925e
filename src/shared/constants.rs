/// Multipart field carrying the notice attachment
pub const ATTACHMENT_FIELD: &str = "attachment";

/// Status hint that lets a notice be saved with relaxed validation
pub const DRAFT_STATUS_HINT: &str = "Draft";

/// Extra body allowance on top of the configured limit for multipart framing
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
