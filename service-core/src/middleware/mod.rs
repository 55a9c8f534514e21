pub mod tracing;

pub use self::tracing::{REQUEST_ID_HEADER, extract_request_id, request_id_middleware};
