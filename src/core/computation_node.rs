// Copyright @yucwang 2021

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique default id, `<type_name>_<sequence>`.
pub fn generate_node_id(type_name: &str) -> String {
    let seq = NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed);
    format!("{}_{}", type_name, seq)
}

/// Long-lived shading component that shows up in logs.
pub trait ComputationNode {
    fn id(&self) -> &str;

    // One-line summary for log output.
    fn describe(&self) -> String;

    fn log_summary(&self) {
        log::debug!("{} ({})", self.describe(), self.id());
    }
}
