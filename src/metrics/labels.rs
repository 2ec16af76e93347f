//! Metric names and label values

pub const SESSIONS_CONNECTED: &str = "rados_pools_sessions_connected_total";
pub const SESSIONS_SHUTDOWN: &str = "rados_pools_sessions_shutdown_total";
pub const POOL_OPERATIONS: &str = "rados_pools_pool_operations_total";
pub const NATIVE_FAILURES: &str = "rados_pools_native_failures_total";
pub const LIST_PROBES: &str = "rados_pools_list_probes_total";
pub const CONTEXTS_CREATED: &str = "rados_pools_contexts_created_total";
pub const CONTEXTS_DESTROYED: &str = "rados_pools_contexts_destroyed_total";

pub const LIST_PAYLOAD_BYTES: &str = "rados_pools_list_payload_bytes";
pub const LIST_PROBES_PER_CALL: &str = "rados_pools_list_probes_per_call";
pub const LIST_POOL_COUNT: &str = "rados_pools_list_pool_count";

pub const OP_CREATE_HANDLE: &str = "create_handle";
pub const OP_CONF_READ: &str = "conf_read_file";
pub const OP_CONNECT: &str = "connect";
pub const OP_POOL_LOOKUP: &str = "pool_lookup";
pub const OP_POOL_CREATE: &str = "pool_create";
pub const OP_POOL_DELETE: &str = "pool_delete";
pub const OP_POOL_LIST: &str = "pool_list";
pub const OP_IOCTX_CREATE: &str = "ioctx_create";

pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_ERROR: &str = "error";
